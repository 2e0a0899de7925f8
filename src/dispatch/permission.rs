use serenity::all::Permissions;

/// Returns the human-readable names of every required permission the holder
/// is missing. Empty means the gate passes.
pub fn missing_permissions(held: Permissions, required: Permissions) -> Vec<String> {
    let missing = required & !held;
    missing
        .get_permission_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
