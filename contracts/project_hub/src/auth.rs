//! Administrator bootstrap and gate.
//!
//! ProjectHub has a single administrator, fixed at `init`. Admin-only entry
//! points resolve the stored address and demand its signature via
//! `require_auth`; there is no role hierarchy.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::Error;

/// Store the administrator and the native asset address.
///
/// Panics with `AlreadyInitialized` on a second call — the admin cannot be
/// replaced after deployment.
pub fn init(env: &Env, admin: &Address, native_asset: &Address) {
    if storage::has_admin(env) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    storage::set_admin(env, admin);
    storage::set_native_asset(env, native_asset);
}

/// Resolve the administrator and require their authorization.
///
/// Returns the admin address so callers can use it as a transfer
/// destination without a second storage read.
pub fn require_admin(env: &Env) -> Address {
    let admin = storage::get_admin(env);
    admin.require_auth();
    admin
}
