// src/common/policy.rs
//! Record-level permission policy for the admin surface
//!
//! Every rule is an explicit boolean function keyed by
//! (entity, action, actor, record owner). Handlers call `is_allowed`
//! and map a `false` result to a generic 403.

/// The acting, already-authenticated user as seen by permission checks
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub is_superuser: bool,
}

/// Entities exposed through the admin surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Service,
    Provider,
    Review,
    User,
    Group,
}

/// Actions an actor can attempt against a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Change,
    Delete,
}

/// Resolve whether `actor` may perform `action` on `entity`.
///
/// `owner_id` is the stamped owner of the target record (`user_id` for
/// reviews), or `None` for creation and listing where no record exists
/// yet.
///
/// Rules:
/// - Service/Provider: any authenticated user may view or add; only
///   superusers may change or delete, regardless of who created the
///   record.
/// - Review: any authenticated user may view or add; only the authoring
///   user may change or delete their own review. Superusers get no
///   special treatment here.
/// - User/Group management is restricted to superusers for every
///   action except viewing the navigation counts.
pub fn is_allowed(entity: Entity, action: Action, actor: &Actor, owner_id: Option<&str>) -> bool {
    match entity {
        Entity::Service | Entity::Provider => match action {
            Action::View | Action::Add => true,
            Action::Change | Action::Delete => actor.is_superuser,
        },
        Entity::Review => match action {
            Action::View | Action::Add => true,
            Action::Change | Action::Delete => {
                matches!(owner_id, Some(owner) if owner == actor.id)
            }
        },
        Entity::User | Entity::Group => match action {
            Action::View => true,
            Action::Add | Action::Change | Action::Delete => actor.is_superuser,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn superuser() -> Actor {
        Actor {
            id: "U_ADM1N0".to_string(),
            is_superuser: true,
        }
    }

    fn member() -> Actor {
        Actor {
            id: "U_MEMBER".to_string(),
            is_superuser: false,
        }
    }

    #[test]
    fn test_any_authenticated_user_may_create_catalog_records() {
        let actor = member();
        assert!(is_allowed(Entity::Service, Action::Add, &actor, None));
        assert!(is_allowed(Entity::Provider, Action::Add, &actor, None));
    }

    #[test]
    fn test_only_superusers_mutate_services_and_providers() {
        let actor = member();
        // Even the creator of the record cannot change or delete it
        assert!(!is_allowed(
            Entity::Service,
            Action::Change,
            &actor,
            Some(&actor.id)
        ));
        assert!(!is_allowed(
            Entity::Provider,
            Action::Delete,
            &actor,
            Some(&actor.id)
        ));

        let admin = superuser();
        // Superusers may mutate records created by anyone
        assert!(is_allowed(
            Entity::Service,
            Action::Change,
            &admin,
            Some("U_MEMBER")
        ));
        assert!(is_allowed(
            Entity::Provider,
            Action::Delete,
            &admin,
            Some("U_MEMBER")
        ));
    }

    #[test]
    fn test_review_mutation_requires_authorship() {
        let author = member();
        assert!(is_allowed(
            Entity::Review,
            Action::Change,
            &author,
            Some(&author.id)
        ));
        assert!(is_allowed(
            Entity::Review,
            Action::Delete,
            &author,
            Some(&author.id)
        ));

        assert!(!is_allowed(
            Entity::Review,
            Action::Change,
            &author,
            Some("U_OTHERZ")
        ));
        assert!(!is_allowed(
            Entity::Review,
            Action::Delete,
            &author,
            Some("U_OTHERZ")
        ));
    }

    #[test]
    fn test_superuser_cannot_edit_someone_elses_review() {
        let admin = superuser();
        assert!(!is_allowed(
            Entity::Review,
            Action::Change,
            &admin,
            Some("U_MEMBER")
        ));
        assert!(!is_allowed(
            Entity::Review,
            Action::Delete,
            &admin,
            Some("U_MEMBER")
        ));
    }

    #[test]
    fn test_review_mutation_without_owner_is_denied() {
        let actor = member();
        assert!(!is_allowed(Entity::Review, Action::Change, &actor, None));
        assert!(!is_allowed(Entity::Review, Action::Delete, &actor, None));
    }

    #[test]
    fn test_account_management_is_superuser_only() {
        let actor = member();
        let admin = superuser();

        for action in [Action::Add, Action::Change, Action::Delete] {
            assert!(!is_allowed(Entity::User, action, &actor, None));
            assert!(!is_allowed(Entity::Group, action, &actor, None));
            assert!(is_allowed(Entity::User, action, &admin, None));
            assert!(is_allowed(Entity::Group, action, &admin, None));
        }
    }

    #[test]
    fn test_everyone_authenticated_may_view() {
        let actor = member();
        for entity in [
            Entity::Service,
            Entity::Provider,
            Entity::Review,
            Entity::User,
            Entity::Group,
        ] {
            assert!(is_allowed(entity, Action::View, &actor, None));
        }
    }
}
