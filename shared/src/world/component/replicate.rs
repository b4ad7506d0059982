use std::{any::Any, sync::Arc};

use attrib_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::world::{
    component::{
        descriptor::DescriptorInfo, error::ComponentError, schema::ComponentSchema, value::Value,
    },
    document::Document,
};

/// A live component as seen by registries and the sync protocol, with the
/// concrete state type erased
pub trait Replicate: Send + Sync + 'static {
    fn id(&self) -> &str;

    fn auto_apply(&self) -> bool;

    fn descriptors(&self) -> Vec<&DescriptorInfo>;

    fn descriptor(&self, descriptor_id: &str) -> Option<&DescriptorInfo>;

    fn has_public_descriptor(&self) -> bool {
        self.descriptors().iter().any(|info| info.is_public())
    }

    fn get(&self, descriptor_id: &str) -> Option<Value>;

    fn set(&mut self, descriptor_id: &str, value: Value) -> Result<(), ComponentError>;

    /// A fresh instance from the same schema, sharing no state with `self`
    fn create(&self) -> Box<dyn Replicate>;

    /// A deep copy of the current state
    fn copy(&self) -> Box<dyn Replicate>;

    fn encode(&self, document: &mut Document, persist_only: bool);

    fn decode(&mut self, document: &Document, persist_only: bool);

    /// Writes `[fieldCount][descriptorId value]*` for the descriptors that
    /// pass `filter`. Fails on a value too long for the wire, leaving the
    /// writer partly written.
    fn write_fields(
        &self,
        writer: &mut dyn ByteWrite,
        filter: &dyn Fn(&DescriptorInfo) -> bool,
    ) -> Result<(), SerdeErr>;

    /// Reads the value for `descriptor_id` off the wire and applies it.
    /// `Ok(false)` when there is no such descriptor; nothing is read then.
    fn read_field(
        &mut self,
        descriptor_id: &str,
        reader: &mut ByteReader,
    ) -> Result<bool, SerdeErr>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// One holder's copy of a component: shared schema, owned state
pub struct Instance<C> {
    schema: Arc<ComponentSchema<C>>,
    state: C,
}

impl<C: Clone + Send + Sync + 'static> Instance<C> {
    pub fn new(schema: Arc<ComponentSchema<C>>) -> Self {
        let state = schema.create();
        Self { schema, state }
    }

    pub fn with_state(schema: Arc<ComponentSchema<C>>, state: C) -> Self {
        Self { schema, state }
    }

    pub fn schema(&self) -> &Arc<ComponentSchema<C>> {
        &self.schema
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut C {
        &mut self.state
    }

    pub fn into_state(self) -> C {
        self.state
    }
}

impl<C: Clone + Send + Sync + 'static> Replicate for Instance<C> {
    fn id(&self) -> &str {
        self.schema.id()
    }

    fn auto_apply(&self) -> bool {
        self.schema.auto_apply()
    }

    fn descriptors(&self) -> Vec<&DescriptorInfo> {
        self.schema
            .descriptors()
            .iter()
            .map(|descriptor| descriptor.info())
            .collect()
    }

    fn descriptor(&self, descriptor_id: &str) -> Option<&DescriptorInfo> {
        self.schema
            .descriptor(descriptor_id)
            .map(|descriptor| descriptor.info())
    }

    fn get(&self, descriptor_id: &str) -> Option<Value> {
        self.schema
            .descriptor(descriptor_id)
            .map(|descriptor| descriptor.get(&self.state))
    }

    fn set(&mut self, descriptor_id: &str, value: Value) -> Result<(), ComponentError> {
        let Some(descriptor) = self.schema.descriptor(descriptor_id) else {
            return Err(ComponentError::UnknownDescriptor {
                component_id: self.schema.id().to_string(),
                descriptor_id: descriptor_id.to_string(),
            });
        };
        descriptor.set(&mut self.state, value)
    }

    fn create(&self) -> Box<dyn Replicate> {
        Box::new(Instance::new(self.schema.clone()))
    }

    fn copy(&self) -> Box<dyn Replicate> {
        Box::new(Instance::with_state(self.schema.clone(), self.state.clone()))
    }

    fn encode(&self, document: &mut Document, persist_only: bool) {
        self.schema.encode(&self.state, document, persist_only);
    }

    fn decode(&mut self, document: &Document, persist_only: bool) {
        self.schema.decode(&mut self.state, document, persist_only);
    }

    fn write_fields(
        &self,
        writer: &mut dyn ByteWrite,
        filter: &dyn Fn(&DescriptorInfo) -> bool,
    ) -> Result<(), SerdeErr> {
        let selected: Vec<_> = self
            .schema
            .descriptors()
            .iter()
            .filter(|descriptor| filter(descriptor.info()))
            .collect();
        (selected.len() as i32).ser(writer);
        for descriptor in selected {
            descriptor.write_wire(writer, &self.state)?;
        }
        Ok(())
    }

    fn read_field(
        &mut self,
        descriptor_id: &str,
        reader: &mut ByteReader,
    ) -> Result<bool, SerdeErr> {
        let Some(descriptor) = self.schema.descriptor(descriptor_id) else {
            return Ok(false);
        };
        descriptor.read_wire(reader, &mut self.state)?;
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
