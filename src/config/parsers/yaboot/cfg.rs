// SPDX-License-Identifier: MIT

//! The labeled-stanza configuration sub-parser.
//!
//! A manifest in this form is a flat list of directives; each `image=`
//! directive opens a new stanza, and everything before the first one belongs
//! to the global stanza. Within a stanza, `key=value` lines set string
//! attributes (values may be quoted) and bare words set boolean flags.
//!
//! ```text
//! init-message="Welcome\nSecond line ignored"
//! partition=2
//! default=linux
//!
//! image=/boot/vmlinux
//!     label=linux
//!     root=/dev/sda2
//!     read-only
//!     append="quiet"
//! ```

use thiserror::Error;

/// An error indicating an unrecoverable manifest structure problem.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CfgError {
    /// The manifest contains no labeled stanza at all.
    #[error("Manifest has no image stanza")]
    NoStanzas,

    /// The global `default` directive names no existing stanza.
    #[error("Default label \"{0}\" does not match any stanza")]
    BadDefault(String),
}

/// One attribute table: string attributes plus boolean flags.
#[derive(Debug, Default)]
pub struct Stanza {
    /// String attributes, in file order.
    strings: Vec<(String, String)>,

    /// Boolean flags, in file order.
    flags: Vec<String>,
}

impl Stanza {
    /// Looks up a string attribute. The first occurrence wins.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Checks a boolean flag.
    #[must_use = "Has no effect if the result is unused"]
    pub fn flag(&self, key: &str) -> bool {
        self.flags.iter().any(|f| f == key)
    }

    /// Stores a string attribute.
    fn set(&mut self, key: &str, value: &str) {
        self.strings.push((key.to_owned(), value.to_owned()));
    }
}

/// A parsed labeled-stanza manifest.
#[derive(Debug, Default)]
pub struct ConfFile {
    /// The global (unlabeled) stanza.
    globals: Stanza,

    /// The labeled stanzas, in file order.
    stanzas: Vec<(String, Stanza)>,
}

impl ConfFile {
    /// Parses whole-manifest text.
    ///
    /// Malformed lines are skipped; the parse itself cannot fail. Structural
    /// requirements (at least one stanza, resolvable default) are enforced
    /// by [`Self::validate`].
    #[must_use = "Has no effect if the result is unused"]
    pub fn parse(content: &str) -> Self {
        let mut conf = Self::default();
        // image paths double as labels until a label attribute shows up
        let mut current: Option<(String, Stanza)> = None;

        let mut lines = content.lines();
        while let Some(raw) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                match &mut current {
                    Some((_, stanza)) => stanza.flags.push(line.to_owned()),
                    None => conf.globals.flags.push(line.to_owned()),
                }
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let mut value = value.trim().to_owned();
            // a quoted value runs across line breaks until its closing quote
            while open_quoted(&value) {
                let Some(next) = lines.next() else { break };
                value.push('\n');
                value.push_str(next.trim_end());
            }
            let value = unquote(&value);

            if key == "image" {
                if let Some(stanza) = current.take() {
                    conf.stanzas.push(stanza);
                }
                let mut stanza = Stanza::default();
                stanza.set("image", value);
                current = Some((value.to_owned(), stanza));
                continue;
            }
            match &mut current {
                Some((label, stanza)) => {
                    if key == "label" {
                        *label = value.to_owned();
                    }
                    stanza.set(key, value);
                }
                None => conf.globals.set(key, value),
            }
        }
        if let Some(stanza) = current.take() {
            conf.stanzas.push(stanza);
        }
        conf
    }

    /// Checks the structural requirements of the strict stanza dialect.
    ///
    /// # Errors
    ///
    /// May return an `Error` if there are no stanzas, or a global `default`
    /// directive names a label with no stanza.
    pub fn validate(&self) -> Result<(), CfgError> {
        if self.stanzas.is_empty() {
            return Err(CfgError::NoStanzas);
        }
        // always Some here; the fallback is the first stanza's own label
        if let Some(default) = self.default_label()
            && self.stanza(default).is_none()
        {
            return Err(CfgError::BadDefault(default.to_owned()));
        }
        Ok(())
    }

    /// The global (unlabeled) stanza.
    #[must_use = "Has no effect if the result is unused"]
    pub fn globals(&self) -> &Stanza {
        &self.globals
    }

    /// The stanza labels, in file order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.stanzas.iter().map(|(label, _)| label.as_str())
    }

    /// Looks up a stanza by label.
    #[must_use = "Has no effect if the result is unused"]
    pub fn stanza(&self, label: &str) -> Option<&Stanza> {
        self.stanzas
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, stanza)| stanza)
    }

    /// The default label: the global `default` directive, else the first
    /// stanza's label.
    #[must_use = "Has no effect if the result is unused"]
    pub fn default_label(&self) -> Option<&str> {
        self.globals
            .get("default")
            .or_else(|| self.labels().next())
    }
}

/// Whether a value opens with a quote that has not yet been closed.
fn open_quoted(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.first() {
        Some(&q @ (b'"' | b'\'')) => bytes.len() < 2 || bytes[bytes.len() - 1] != q,
        _ => false,
    }
}

/// Strips one layer of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
