//! Keyboard symbol and modifier vocabulary shared by the keybind registry
//! and the backend event surface.

use bitflags::bitflags;

pub use xkeysym::Keysym;

bitflags! {
    /// Keyboard modifier set as reported by the backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

/// Letter codes used in chord syntax, in canonical order. Iterating this
/// fixed table is what makes chord strings deterministic: the same modifier
/// set always renders the same string no matter how the event reported it.
/// Caps has no letter of its own; it can only take part through the prefix
/// marker.
pub(crate) const MOD_LETTERS: &[(Modifiers, &str)] = &[
    (Modifiers::SHIFT, "S"),
    (Modifiers::CTRL, "C"),
    (Modifiers::ALT, "M"),
    (Modifiers::LOGO, "L"),
    (Modifiers::MOD2, "M2"),
    (Modifiers::MOD3, "M3"),
    (Modifiers::MOD5, "M5"),
];

/// Canonical name of a key symbol, e.g. `Return`, `KP_1`, `q`.
pub fn keysym_name(sym: Keysym) -> Option<&'static str> {
    sym.name().map(|name| name.strip_prefix("XK_").unwrap_or(name))
}
