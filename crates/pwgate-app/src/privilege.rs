use pwgate_domain::host::Privilege;

/// Privileged when the process runs with effective uid 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectiveUid;

impl Privilege for EffectiveUid {
    #[cfg(unix)]
    fn is_privileged(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    #[cfg(not(unix))]
    fn is_privileged(&self) -> bool {
        false
    }
}
