use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};

/// Surrogate identity of a persisted record.
///
/// The key is `None` until the store assigns one on insert; an entity without
/// a key has never been persisted.
pub trait HasId {
    type Id: Copy + Debug + Display + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static;

    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Self::Id);

    /// Drop the key, so the next save inserts a new record.
    fn clear_id(&mut self);

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// An entity that can be served by the generic CRUD layer.
///
/// `PartialEq` is the value equality used by the duplicate check on create.
/// Implementations should compare business fields and ignore the key, so a
/// payload without an id can match a stored row.
pub trait CrudEntity:
    HasId + PartialEq + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";
}

/// Implement [`HasId`] for a struct with an `id: Option<$id>` field.
///
/// Usage: `impl_has_id!(Todo)` for `i64` keys, `impl_has_id!(Todo, i32)` otherwise.
#[macro_export]
macro_rules! impl_has_id {
    ($entity:ty) => {
        $crate::impl_has_id!($entity, i64);
    };
    ($entity:ty, $id:ty) => {
        impl $crate::HasId for $entity {
            type Id = $id;

            fn id(&self) -> Option<$id> {
                self.id
            }

            fn set_id(&mut self, id: $id) {
                self.id = Some(id);
            }

            fn clear_id(&mut self) {
                self.id = None;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::HasId;

    #[derive(Debug, Default)]
    struct Base {
        id: Option<i64>,
    }

    crate::impl_has_id!(Base);

    #[test]
    fn test_id_is_unset_until_assigned() {
        let mut base = Base::default();
        assert_eq!(base.id(), None);
        assert!(!base.is_persisted());

        base.set_id(1);
        assert_eq!(base.id(), Some(1));
        assert!(base.is_persisted());

        base.clear_id();
        assert_eq!(base.id(), None);
    }
}
