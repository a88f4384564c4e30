//! Declaration flags and access modifiers.

use bitflags::bitflags;

bitflags! {
    /// What a member or type declaration is.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FlagType: u32 {
        const PACKAGE = 1 << 0;
        const CLASS = 1 << 1;
        const INTERFACE = 1 << 2;
        const VARIABLE = 1 << 3;
        const CONSTANT = 1 << 4;
        const FUNCTION = 1 << 5;
        const GETTER = 1 << 6;
        const SETTER = 1 << 7;
        const STATIC = 1 << 8;
        /// Declared by the runtime, not by user code.
        const INTRINSIC = 1 << 9;
        const DYNAMIC = 1 << 10;
        const OVERRIDE = 1 << 11;
        const LOCAL_VAR = 1 << 12;
        /// Synthesized field of a custom object type.
        const AUTOMATIC_VAR = 1 << 13;
        const CONSTRUCTOR = 1 << 14;
        const IMPORT = 1 << 15;
        const FINAL = 1 << 16;

        /// Any type declaration.
        const TYPE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

bitflags! {
    /// Access modifiers of a declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Visibility: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;
    }
}

impl Visibility {
    /// Parse a modifier keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::PUBLIC),
            "private" => Some(Self::PRIVATE),
            "protected" => Some(Self::PROTECTED),
            "internal" => Some(Self::INTERNAL),
            _ => None,
        }
    }
}
