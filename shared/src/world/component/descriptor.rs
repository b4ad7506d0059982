use std::borrow::Cow;

use attrib_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::world::{
    component::{
        error::ComponentError,
        value::{FieldValue, Value, ValueKind},
    },
    document::{Document, Tag},
};

/// Descriptor ids are case-insensitive and stored lower-cased
pub(crate) fn normalize_id(id: &str) -> Cow<'_, str> {
    if id.chars().any(char::is_uppercase) {
        Cow::Owned(id.to_lowercase())
    } else {
        Cow::Borrowed(id)
    }
}

/// Schema of one field, independent of the component type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptorInfo {
    id: String,
    display_name: String,
    kind: ValueKind,
    is_public: bool,
    is_persistent: bool,
    abbrev: String,
}

impl DescriptorInfo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Public fields are replicated to every tracking peer
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Persistent fields are written on save
    pub fn is_persistent(&self) -> bool {
        self.is_persistent
    }

    /// Short label, empty when none was given
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }
}

type Getter<C> = Box<dyn Fn(&C) -> Value + Send + Sync>;
type Setter<C> = Box<dyn Fn(&mut C, Value) -> Result<(), ValueKind> + Send + Sync>;

/// Typed accessor for one field of component state `C`. Holds no data of its
/// own: every read or write goes through the `C` passed in.
pub struct Descriptor<C> {
    info: DescriptorInfo,
    getter: Getter<C>,
    setter: Setter<C>,
}

impl<C: 'static> Descriptor<C> {
    /// A private, non-persistent field. Chain `public()` / `persistent()` to
    /// change that.
    pub fn new<V, G, S>(id: &str, getter: G, setter: S) -> Self
    where
        V: FieldValue + 'static,
        G: Fn(&C) -> V + Send + Sync + 'static,
        S: Fn(&mut C, V) + Send + Sync + 'static,
    {
        Self {
            info: DescriptorInfo {
                id: normalize_id(id).into_owned(),
                display_name: id.to_string(),
                kind: V::KIND,
                is_public: false,
                is_persistent: false,
                abbrev: String::new(),
            },
            getter: Box::new(move |holder: &C| getter(holder).into_value()),
            setter: Box::new(move |holder: &mut C, value: Value| {
                let found = value.kind();
                let value = V::from_value(value).ok_or(found)?;
                setter(holder, value);
                Ok(())
            }),
        }
    }

    pub fn public(mut self) -> Self {
        self.info.is_public = true;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.info.is_persistent = true;
        self
    }

    pub fn abbrev(mut self, abbrev: &str) -> Self {
        self.info.abbrev = abbrev.to_string();
        self
    }

    pub fn info(&self) -> &DescriptorInfo {
        &self.info
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn kind(&self) -> ValueKind {
        self.info.kind
    }

    pub fn is_public(&self) -> bool {
        self.info.is_public
    }

    pub fn is_persistent(&self) -> bool {
        self.info.is_persistent
    }

    pub fn get(&self, holder: &C) -> Value {
        (self.getter)(holder)
    }

    pub fn set(&self, holder: &mut C, value: Value) -> Result<(), ComponentError> {
        (self.setter)(holder, value).map_err(|found| ComponentError::KindMismatch {
            descriptor_id: self.info.id.clone(),
            expected: self.info.kind,
            found,
        })
    }

    /// Writes the current value as one leaf keyed by the descriptor id
    pub fn write_to(&self, document: &mut Document, holder: &C) {
        document.put(&self.info.id, Tag::from(self.get(holder)));
    }

    /// Applies the leaf keyed by the descriptor id. A missing leaf, or one of
    /// another kind, leaves the current value untouched.
    pub fn read_from(&self, document: &Document, holder: &mut C) {
        if let Some(value) = document.get_value(&self.info.id, self.info.kind) {
            let applied = self.set(holder, value).is_ok();
            debug_assert!(applied, "leaf read with the descriptor's own kind");
        }
    }

    /// Writes `[descriptorId][typed value]`
    pub fn write_wire(&self, writer: &mut dyn ByteWrite, holder: &C) -> Result<(), SerdeErr> {
        self.info.id.ser(writer);
        self.get(holder).write(writer)
    }

    /// Reads one value of this descriptor's kind and applies it
    pub fn read_wire(&self, reader: &mut ByteReader, holder: &mut C) -> Result<(), SerdeErr> {
        let value = self.info.kind.read(reader)?;
        let applied = self.set(holder, value).is_ok();
        debug_assert!(applied, "value read with the descriptor's own kind");
        Ok(())
    }
}
