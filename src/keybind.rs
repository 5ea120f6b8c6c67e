//! Named keybindings and chord dispatch.
//!
//! A chord is the textual form of a modifier set plus a key symbol:
//! modifier letters in the canonical table order (`S`, `C`, `M`, `L`, `M2`,
//! `M3`, `M5`) joined with `-`, then the keysym name, wrapped in angle
//! brackets — `<S-C-Return>`. When the incoming modifier set equals the
//! configured prefix exactly it is also rendered as the single marker `P`,
//! so bindings are usually written `<P-q>` and keep working when the user
//! remaps the prefix. Registered syntax strings must use the canonical
//! letter order; lookup always constructs it.

use tracing::{info, warn};

use crate::common::collections::HashMap;
use crate::sys::backend::ViewHandle;
use crate::sys::keysym::{Keysym, MOD_LETTERS, Modifiers, keysym_name};
use crate::wm::WindowManager;

/// Signature the extension host must declare for keybind callbacks.
pub const KEYBIND_SIGNATURE: &str = "v(h,u32,ip)|1";

/// Keybind callbacks receive the focused view (if any), the event
/// timestamp, and the opaque argument given at registration.
pub type KeybindFn = fn(&mut WindowManager, Option<ViewHandle>, u32, isize);

pub struct Keybind {
    pub name: String,
    pub syntaxes: Vec<String>,
    pub function: KeybindFn,
    pub arg: isize,
}

/// Render a modifier set plus key name as a chord string.
pub fn chord_syntax(mods: Modifiers, key: &str) -> String {
    let mut parts: Vec<&str> = MOD_LETTERS
        .iter()
        .filter(|(bit, _)| mods.contains(*bit))
        .map(|(_, letter)| *letter)
        .collect();
    parts.push(key);
    format!("<{}>", parts.join("-"))
}

pub struct KeybindRegistry {
    binds: Vec<Keybind>,
    by_syntax: HashMap<String, String>,
    prefix: Modifiers,
}

impl KeybindRegistry {
    pub fn new(prefix: Modifiers) -> Self {
        Self {
            binds: Vec::new(),
            by_syntax: HashMap::default(),
            prefix,
        }
    }

    pub fn prefix(&self) -> Modifiers { self.prefix }

    /// Register a named keybind under the given chord syntaxes.
    ///
    /// Fails without mutating anything when the declared signature does not
    /// match or the name is taken. Syntaxes already mapped to another
    /// keybind are skipped with a warning; the binding still registers
    /// under its remaining aliases.
    pub fn add(
        &mut self,
        name: &str,
        syntaxes: &[&str],
        function: KeybindFn,
        arg: isize,
        signature: &str,
    ) -> bool {
        if signature != KEYBIND_SIGNATURE {
            warn!(
                "wrong signature provided for '{name} keybind' function ({KEYBIND_SIGNATURE} != {signature})"
            );
            return false;
        }

        if self.get(name).is_some() {
            warn!("keybind with name '{name}' already exists");
            return false;
        }

        let mut mapped = Vec::new();
        for &syntax in syntaxes {
            if syntax.is_empty() {
                continue;
            }
            if let Some(owner) = self.by_syntax.get(syntax) {
                warn!("'{syntax}' is already mapped to keybind '{owner}'");
                continue;
            }
            self.by_syntax.insert(syntax.to_owned(), name.to_owned());
            mapped.push(syntax.to_owned());
        }

        info!(
            "added keybind: {name} ({})",
            if mapped.is_empty() { "none".to_owned() } else { mapped.join(", ") }
        );

        self.binds.push(Keybind {
            name: name.to_owned(),
            syntaxes: mapped,
            function,
            arg,
        });
        true
    }

    /// Remove a keybind and every syntax mapping that points to it.
    pub fn remove(&mut self, name: &str) {
        let Some(pos) = self.binds.iter().position(|k| k.name == name) else {
            return;
        };
        self.binds.remove(pos);
        self.by_syntax.retain(|_, owner| owner != name);
        info!("removed keybind: {name}");
    }

    pub fn get(&self, name: &str) -> Option<&Keybind> {
        self.binds.iter().find(|k| k.name == name)
    }

    pub fn for_syntax(&self, syntax: &str) -> Option<&Keybind> {
        let name = self.by_syntax.get(syntax)?;
        self.binds.iter().find(|k| &k.name == name)
    }

    /// Resolve an incoming modifier/key pair to a keybind. The prefixed
    /// chord form is looked up first so `<P-q>` beats an explicit spelling
    /// of the same modifiers.
    pub fn resolve(&self, mods: Modifiers, sym: Keysym) -> Option<&Keybind> {
        let name = keysym_name(sym)?;

        if !self.prefix.is_empty() && mods == self.prefix {
            let prefixed = format!("<P-{name}>");
            if let Some(keybind) = self.for_syntax(&prefixed) {
                return Some(keybind);
            }
        }

        self.for_syntax(&chord_syntax(mods, name))
    }

    /// Like [`resolve`](Self::resolve), but returns the callback by value
    /// so the caller can drop the registry borrow before invoking it.
    pub(crate) fn lookup(&self, mods: Modifiers, sym: Keysym) -> Option<(KeybindFn, isize)> {
        self.resolve(mods, sym).map(|k| (k.function, k.arg))
    }

    pub fn is_empty(&self) -> bool { self.binds.is_empty() }

    pub fn len(&self) -> usize { self.binds.len() }
}
