//! Per-path change events derived from `notify` notifications.

use notify::event::{EventKind, ModifyKind, RenameMode};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf};

/// Set of operations observed on one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ops(u8);

impl Ops {
    pub const CREATE: Ops = Ops(1);
    pub const WRITE: Ops = Ops(1 << 1);
    pub const REMOVE: Ops = Ops(1 << 2);
    pub const RENAME: Ops = Ops(1 << 3);
    pub const CHMOD: Ops = Ops(1 << 4);

    const NAMES: [(Ops, &'static str); 5] = [
        (Ops::CREATE, "CREATE"),
        (Ops::WRITE, "WRITE"),
        (Ops::REMOVE, "REMOVE"),
        (Ops::RENAME, "RENAME"),
        (Ops::CHMOD, "CHMOD"),
    ];

    pub const fn empty() -> Self {
        Ops(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Ops) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Ops) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Ops {
    type Output = Ops;

    fn bitor(self, rhs: Ops) -> Ops {
        Ops(self.0 | rhs.0)
    }
}

impl BitOrAssign for Ops {
    fn bitor_assign(&mut self, rhs: Ops) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Ops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[no events]");
        }
        let mut first = true;
        for (op, name) in Self::NAMES {
            if self.contains(op) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub name: PathBuf,
    pub ops: Ops,
}

impl WatchEvent {
    pub fn new(name: impl Into<PathBuf>, ops: Ops) -> Self {
        Self {
            name: name.into(),
            ops,
        }
    }

    /// Whether this event should (re)arm the reload timer for `target`.
    ///
    /// Chmod, remove and rename-away never qualify. A file renamed over
    /// the target shows up as a create on the target name.
    pub fn is_qualifying(&self, target: &Path) -> bool {
        !self.name.as_os_str().is_empty()
            && self.name == target
            && self.ops.intersects(Ops::CREATE | Ops::WRITE)
    }

    /// Split one notification into one event per affected path.
    pub fn from_notify(event: &notify::Event) -> Vec<WatchEvent> {
        let uniform = |ops: Ops| {
            event
                .paths
                .iter()
                .map(|p| WatchEvent::new(p.clone(), ops))
                .collect()
        };

        match &event.kind {
            EventKind::Create(_) => uniform(Ops::CREATE),
            EventKind::Remove(_) => uniform(Ops::REMOVE),
            EventKind::Modify(ModifyKind::Metadata(_)) => uniform(Ops::CHMOD),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => uniform(Ops::CREATE),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => uniform(Ops::RENAME),
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                // paths are [from, to]
                let mut events = Vec::with_capacity(2);
                if let Some(from) = event.paths.first() {
                    events.push(WatchEvent::new(from.clone(), Ops::RENAME));
                }
                if let Some(to) = event.paths.get(1) {
                    events.push(WatchEvent::new(to.clone(), Ops::CREATE));
                }
                events
            }
            EventKind::Modify(ModifyKind::Name(_)) => {
                // Backends that cannot tell the two sides of a rename apart:
                // whichever path still exists is the one renamed in.
                event
                    .paths
                    .iter()
                    .map(|p| {
                        let ops = if p.exists() { Ops::CREATE } else { Ops::RENAME };
                        WatchEvent::new(p.clone(), ops)
                    })
                    .collect()
            }
            EventKind::Modify(_) => uniform(Ops::WRITE),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
        }
    }
}
