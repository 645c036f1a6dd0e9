use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fractal::Mode;

/// Validity and last artifact for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSlot {
    valid: bool,
    artifact: Option<PathBuf>,
}

impl CacheSlot {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The most recent artifact, which may be stale if the slot is invalid.
    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }
}

/// Two-slot validity ledger keyed by [`Mode`].
///
/// The cache never renders anything itself. Callers invalidate slots when
/// the viewport or the Julia constant changes and mark them valid once an
/// external render has produced a fresh artifact. A slot can only become
/// valid together with an artifact, so `is_valid` implies `artifact` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCache {
    mandelbrot: CacheSlot,
    julia: CacheSlot,
}

impl RenderCache {
    /// A cache with both slots invalid and empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, mode: Mode) -> &CacheSlot {
        match mode {
            Mode::Mandelbrot => &self.mandelbrot,
            Mode::Julia => &self.julia,
        }
    }

    fn slot_mut(&mut self, mode: Mode) -> &mut CacheSlot {
        match mode {
            Mode::Mandelbrot => &mut self.mandelbrot,
            Mode::Julia => &mut self.julia,
        }
    }

    pub fn is_valid(&self, mode: Mode) -> bool {
        self.slot(mode).valid
    }

    pub fn artifact(&self, mode: Mode) -> Option<&Path> {
        self.slot(mode).artifact()
    }

    /// Mark `mode` stale. The previous artifact is kept for display.
    pub fn invalidate(&mut self, mode: Mode) {
        let slot = self.slot_mut(mode);
        if slot.valid {
            debug!(%mode, "Cache slot invalidated");
        }
        slot.valid = false;
    }

    pub fn invalidate_all(&mut self) {
        for mode in Mode::ALL {
            self.invalidate(mode);
        }
    }

    /// Record a freshly produced artifact for `mode`.
    pub fn mark_valid(&mut self, mode: Mode, artifact: impl Into<PathBuf>) {
        let slot = self.slot_mut(mode);
        slot.artifact = Some(artifact.into());
        slot.valid = true;
        debug!(%mode, "Cache slot marked valid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_invalid_and_empty() {
        let cache = RenderCache::new();
        for m in Mode::ALL {
            assert!(!cache.is_valid(m));
            assert!(cache.artifact(m).is_none());
        }
    }

    #[test]
    fn mark_valid_sets_artifact() {
        let mut cache = RenderCache::new();
        cache.mark_valid(Mode::Julia, "renders/julia.png");
        assert!(cache.is_valid(Mode::Julia));
        assert!(!cache.is_valid(Mode::Mandelbrot));
        assert_eq!(
            cache.artifact(Mode::Julia),
            Some(Path::new("renders/julia.png"))
        );
    }

    #[test]
    fn invalidate_is_per_slot_and_keeps_artifact() {
        let mut cache = RenderCache::new();
        cache.mark_valid(Mode::Mandelbrot, "m.png");
        cache.mark_valid(Mode::Julia, "j.png");

        cache.invalidate(Mode::Julia);
        assert!(cache.is_valid(Mode::Mandelbrot));
        assert!(!cache.is_valid(Mode::Julia));
        assert_eq!(cache.artifact(Mode::Julia), Some(Path::new("j.png")));

        cache.invalidate_all();
        assert!(!cache.is_valid(Mode::Mandelbrot));
        assert!(!cache.is_valid(Mode::Julia));
    }
}
