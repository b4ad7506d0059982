use std::fmt;

use attrib_serde::{check_string_length, ByteReader, ByteWriter, Serde, SerdeErr};

use crate::{
    messages::{error::ProtocolError, message_kind::MessageKind},
    types::HolderId,
    world::component::{
        catalog::Catalog,
        descriptor::{normalize_id, DescriptorInfo},
        replicate::Replicate,
    },
};

/// Which descriptors of a component an `AddOrUpdate` carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Public descriptors only, for peers tracking the holder
    PublicOnly,
    /// Every descriptor, for the holder's own connection
    All,
}

/// Full or partial state of one component of one holder
pub struct AddOrUpdate {
    pub holder: HolderId,
    /// Carried values live here; every other field holds its default
    pub component: Box<dyn Replicate>,
    /// Ids of the descriptors carried, in wire order
    pub fields: Vec<String>,
}

impl AddOrUpdate {
    /// Snapshots `component`, keeping only the descriptors `visibility` lets
    /// through
    pub fn new(holder: HolderId, component: &dyn Replicate, visibility: Visibility) -> Self {
        let fields = component
            .descriptors()
            .into_iter()
            .filter(|info| visibility == Visibility::All || info.is_public())
            .map(|info| info.id().to_string())
            .collect();
        Self {
            holder,
            component: component.copy(),
            fields,
        }
    }

    pub fn component_id(&self) -> &str {
        self.component.id()
    }
}

impl fmt::Debug for AddOrUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddOrUpdate")
            .field("holder", &self.holder)
            .field("component", &self.component.id())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Detaches one component from one holder on the receiving side
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remove {
    pub holder: HolderId,
    pub component_id: String,
}

#[derive(Debug)]
pub enum ComponentMessage {
    AddOrUpdate(AddOrUpdate),
    Remove(Remove),
}

impl ComponentMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            ComponentMessage::AddOrUpdate(_) => MessageKind::AddOrUpdate,
            ComponentMessage::Remove(_) => MessageKind::Remove,
        }
    }

    pub fn holder(&self) -> &HolderId {
        match self {
            ComponentMessage::AddOrUpdate(message) => &message.holder,
            ComponentMessage::Remove(message) => &message.holder,
        }
    }

    pub fn component_id(&self) -> &str {
        match self {
            ComponentMessage::AddOrUpdate(message) => message.component_id(),
            ComponentMessage::Remove(message) => &message.component_id,
        }
    }

    /// One complete payload, kind byte first. Fails with
    /// `SerdeErr::StringTooLong` rather than send a value the receiver would
    /// refuse or get cut short.
    pub fn encode(&self) -> Result<Box<[u8]>, SerdeErr> {
        check_string_length(self.component_id())?;

        let mut writer = ByteWriter::new();
        self.kind().ser(&mut writer);
        self.holder().ser(&mut writer);
        self.component_id().to_string().ser(&mut writer);
        if let ComponentMessage::AddOrUpdate(message) = self {
            let carried = |info: &DescriptorInfo| message.fields.iter().any(|id| id == info.id());
            message.component.write_fields(&mut writer, &carried)?;
        }
        Ok(writer.to_bytes())
    }

    /// Reads one complete payload. Component and descriptor ids are resolved
    /// against `catalog`; decoded values land on a fresh instance, never on
    /// the prototype.
    pub fn decode(catalog: &Catalog, payload: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = ByteReader::new(payload);
        let kind = MessageKind::de(&mut reader)?;
        let holder = HolderId::de(&mut reader)?;
        let component_id = String::de(&mut reader)?;

        let message = match kind {
            MessageKind::AddOrUpdate => {
                let Some(mut component) = catalog.instantiate(&component_id) else {
                    return Err(ProtocolError::UnknownComponent { component_id });
                };
                let count = i32::de(&mut reader)?;
                if count < 0 {
                    return Err(SerdeErr::NegativeLength { length: count }.into());
                }
                let mut fields = Vec::new();
                for _ in 0..count {
                    let descriptor_id = String::de(&mut reader)?;
                    if !component.read_field(&descriptor_id, &mut reader)? {
                        return Err(ProtocolError::UnknownDescriptor {
                            component_id,
                            descriptor_id,
                        });
                    }
                    let descriptor_id = normalize_id(&descriptor_id).into_owned();
                    if !fields.contains(&descriptor_id) {
                        fields.push(descriptor_id);
                    }
                }
                ComponentMessage::AddOrUpdate(AddOrUpdate {
                    holder,
                    component,
                    fields,
                })
            }
            MessageKind::Remove => ComponentMessage::Remove(Remove {
                holder,
                component_id,
            }),
        };

        reader.finish()?;
        Ok(message)
    }
}

impl From<AddOrUpdate> for ComponentMessage {
    fn from(message: AddOrUpdate) -> Self {
        ComponentMessage::AddOrUpdate(message)
    }
}

impl From<Remove> for ComponentMessage {
    fn from(message: Remove) -> Self {
        ComponentMessage::Remove(message)
    }
}
