use serenity::all::Permissions;

use crate::dispatch::permission::missing_permissions;

/// Tests that the missing set names exactly the absent bits.
#[test]
fn names_missing_bits() {
    let required = Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS;
    let held = Permissions::KICK_MEMBERS;

    let missing = missing_permissions(held, required);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0], "Ban Members");
}

/// Tests that a satisfied requirement yields an empty set.
#[test]
fn empty_when_satisfied() {
    let required = Permissions::SEND_MESSAGES;
    let held = Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS;

    assert!(missing_permissions(held, required).is_empty());
}

/// Tests that no requirement always passes, even with no permissions held.
#[test]
fn empty_requirement_always_passes() {
    assert!(missing_permissions(Permissions::empty(), Permissions::empty()).is_empty());
}

/// Tests that every absent bit is reported.
#[test]
fn reports_every_absent_bit() {
    let required =
        Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS | Permissions::MODERATE_MEMBERS;

    let missing = missing_permissions(Permissions::empty(), required);
    assert_eq!(missing.len(), 3);
}
