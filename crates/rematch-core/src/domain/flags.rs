//! Capability Flags
//!
//! The options a caller may request for a compile, and the validated set that
//! actually reaches the matcher. Contradictory requests are resolved exactly
//! once, in [`CapabilityFlags::resolve`], so no other call site has to
//! reinterpret them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Options requested for a compile.
///
/// Every field is a plain toggle; the combination is only checked when the
/// flags are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityFlags {
    /// Search the whole input instead of stopping after the first match
    pub global: bool,
    /// POSIX extended syntax; basic syntax when off
    pub extended: bool,
    /// Ignore case
    pub icase: bool,
    /// Treat embedded newlines as ordinary characters
    pub multiline: bool,
    /// `.` stops at newlines and anchors bind to line boundaries
    pub newline_special: bool,
    /// Record only whole matches
    pub exclude_subexpressions: bool,
    /// Record only capture groups
    pub only_subexpressions: bool,
    /// Report success/fail only. Never honored.
    pub report_only: bool,
}

impl CapabilityFlags {
    pub const NONE: CapabilityFlags = CapabilityFlags {
        global: false,
        extended: false,
        icase: false,
        multiline: false,
        newline_special: false,
        exclude_subexpressions: false,
        only_subexpressions: false,
        report_only: false,
    };

    pub const fn new() -> Self { Self::NONE }

    pub fn global(mut self) -> Self { self.global = true; self }
    pub fn extended(mut self) -> Self { self.extended = true; self }
    pub fn icase(mut self) -> Self { self.icase = true; self }
    pub fn multiline(mut self) -> Self { self.multiline = true; self }
    pub fn newline_special(mut self) -> Self { self.newline_special = true; self }
    pub fn exclude_subexpressions(mut self) -> Self { self.exclude_subexpressions = true; self }
    pub fn only_subexpressions(mut self) -> Self { self.only_subexpressions = true; self }
    pub fn report_only(mut self) -> Self { self.report_only = true; self }

    /// Every option set in either operand.
    pub fn union(self, other: CapabilityFlags) -> Self {
        CapabilityFlags {
            global: self.global || other.global,
            extended: self.extended || other.extended,
            icase: self.icase || other.icase,
            multiline: self.multiline || other.multiline,
            newline_special: self.newline_special || other.newline_special,
            exclude_subexpressions: self.exclude_subexpressions || other.exclude_subexpressions,
            only_subexpressions: self.only_subexpressions || other.only_subexpressions,
            report_only: self.report_only || other.report_only,
        }
    }

    /// Resolve contradictory options into the set the matcher will run with.
    ///
    /// - `multiline` switches `newline_special` off.
    /// - `exclude_subexpressions` wins over `only_subexpressions`.
    /// - `report_only` is always dropped so group extraction stays possible.
    ///
    /// Dropped requests are returned as warnings; the `multiline` override is
    /// the documented meaning of that flag and produces none.
    pub fn resolve(self) -> (ResolvedFlags, Vec<FlagWarning>) {
        let mut warnings = Vec::new();

        let newline_special = self.newline_special && !self.multiline;

        let only_subexpressions = if self.exclude_subexpressions && self.only_subexpressions {
            warnings.push(FlagWarning::OnlySubexpressionsIgnored);
            false
        } else {
            self.only_subexpressions
        };

        if self.report_only {
            warnings.push(FlagWarning::ReportOnlyIgnored);
        }

        let resolved = ResolvedFlags {
            global: self.global,
            extended: self.extended,
            icase: self.icase,
            multiline: self.multiline,
            newline_special,
            exclude_subexpressions: self.exclude_subexpressions,
            only_subexpressions,
        };
        (resolved, warnings)
    }
}

impl fmt::Display for CapabilityFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.global, "global"),
            (self.extended, "extended"),
            (self.icase, "icase"),
            (self.multiline, "multiline"),
            (self.newline_special, "newline"),
            (self.report_only, "report-only"),
            (self.exclude_subexpressions, "no-subexpressions"),
            (self.only_subexpressions, "subexpressions-only"),
        ];
        let active: Vec<&str> = names.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
        if active.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", active.join(" | "))
        }
    }
}

/// A flag set with all mutual-exclusion rules already applied.
///
/// Only obtainable through [`CapabilityFlags::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedFlags {
    global: bool,
    extended: bool,
    icase: bool,
    multiline: bool,
    newline_special: bool,
    exclude_subexpressions: bool,
    only_subexpressions: bool,
}

impl ResolvedFlags {
    pub fn global(&self) -> bool { self.global }
    pub fn extended(&self) -> bool { self.extended }
    pub fn icase(&self) -> bool { self.icase }
    pub fn multiline(&self) -> bool { self.multiline }
    pub fn newline_special(&self) -> bool { self.newline_special }
    pub fn exclude_subexpressions(&self) -> bool { self.exclude_subexpressions }
    pub fn only_subexpressions(&self) -> bool { self.only_subexpressions }

    /// Whether a slot with this submatch index becomes a record.
    pub fn keeps_submatch(&self, submatch: usize) -> bool {
        if self.exclude_subexpressions {
            submatch == 0
        } else if self.only_subexpressions {
            submatch > 0
        } else {
            true
        }
    }

    pub fn as_requested(&self) -> CapabilityFlags {
        CapabilityFlags {
            global: self.global,
            extended: self.extended,
            icase: self.icase,
            multiline: self.multiline,
            newline_special: self.newline_special,
            exclude_subexpressions: self.exclude_subexpressions,
            only_subexpressions: self.only_subexpressions,
            report_only: false,
        }
    }
}

impl fmt::Display for ResolvedFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_requested().fmt(f)
    }
}

/// A requested option that flag resolution dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlagWarning {
    OnlySubexpressionsIgnored,
    ReportOnlyIgnored,
}

impl fmt::Display for FlagWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagWarning::OnlySubexpressionsIgnored => write!(
                f,
                "exclude-subexpressions is set, ignoring only-subexpressions"
            ),
            FlagWarning::ReportOnlyIgnored => write!(
                f,
                "report-only is never honored, group extraction stays enabled"
            ),
        }
    }
}
