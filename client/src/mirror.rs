use log::{trace, warn};

use attrib_shared::{AddOrUpdate, ComponentManager, Remove, Replicate};

use crate::{AttribClientError, ClientEvent};

/// ABSENT -> PRESENT: the decoded instance is stored as is.
/// PRESENT -> PRESENT: only the carried fields are copied over, so fields the
/// server never sends keep their local values.
pub(crate) fn apply_add_or_update(
    manager: &ComponentManager,
    message: AddOrUpdate,
) -> Result<Option<ClientEvent>, AttribClientError> {
    let AddOrUpdate {
        holder,
        component,
        fields,
    } = message;
    let component_id = component.id().to_string();

    let inserted = manager.holders().with_bag_or_insert(holder, |bag| {
        match bag.get_mut(&component_id) {
            Some(existing) => {
                merge(existing, component.as_ref(), &fields);
                false
            }
            None => {
                bag.insert(component);
                true
            }
        }
    })?;

    trace!(
        "{} '{}' of holder {}",
        if inserted { "Inserted" } else { "Updated" },
        component_id,
        holder
    );
    Ok(Some(if inserted {
        ClientEvent::Inserted {
            holder,
            component_id,
        }
    } else {
        ClientEvent::Updated {
            holder,
            component_id,
            fields,
        }
    }))
}

/// PRESENT -> ABSENT. A Remove for an absent component changes nothing.
/// A holder left without components is dropped from the mirror.
pub(crate) fn apply_remove(
    manager: &ComponentManager,
    message: Remove,
) -> Result<Option<ClientEvent>, AttribClientError> {
    let Remove {
        holder,
        component_id,
    } = message;

    if !manager.remove_component(&holder, &component_id) {
        trace!("Remove of absent '{}' for holder {}", component_id, holder);
        return Ok(None);
    }
    if manager.component_ids(&holder).is_empty() {
        manager.holders().remove(&holder);
    }

    Ok(Some(ClientEvent::Removed {
        holder,
        component_id,
    }))
}

fn merge(existing: &mut dyn Replicate, incoming: &dyn Replicate, fields: &[String]) {
    for descriptor_id in fields {
        let Some(value) = incoming.get(descriptor_id) else {
            continue;
        };
        if let Err(error) = existing.set(descriptor_id, value) {
            warn!("Could not merge '{}' into '{}': {}", descriptor_id, existing.id(), error);
        }
    }
}
