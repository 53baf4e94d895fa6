use std::fmt;

/// A `.env` file edited in place.
///
/// Comments, blank lines and unrelated keys survive an edit byte-for-byte;
/// only lines whose key is touched by [`upsert`](Self::upsert) are rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<Line>,
    trailing_newline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry {
        export: bool,
        key: String,
        value: String,
        quoted: bool,
    },
    Verbatim(String),
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let lines = content.lines().map(parse_line).collect();
        Self {
            lines,
            trailing_newline: content.is_empty() || content.ends_with('\n'),
        }
    }

    /// Unquoted value of the first assignment to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key` to `value`.
    ///
    /// The first existing assignment keeps its position, `export` prefix and
    /// quoting; later duplicates are dropped so the file has one source of
    /// truth. A missing key is appended.
    pub fn upsert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;

        self.lines.retain_mut(|line| match line {
            Line::Entry { key: k, value: v, .. } if k.as_str() == key => {
                if found {
                    return false;
                }
                *v = value.clone();
                found = true;
                true
            }
            _ => true,
        });

        if !found {
            self.lines.push(Line::Entry {
                export: false,
                key: key.to_string(),
                quoted: value.contains(char::is_whitespace),
                value,
            });
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { key, .. } => Some(key.as_str()),
            Line::Verbatim(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn parse_line(raw: &str) -> Line {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Verbatim(raw.to_string());
    }

    let (export, body) = match trimmed.strip_prefix("export ") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    let Some((key, value)) = body.split_once('=') else {
        return Line::Verbatim(raw.to_string());
    };
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Line::Verbatim(raw.to_string());
    }

    let value = value.trim();
    let (value, quoted) = match value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    {
        Some(inner) => (inner, true),
        None => (value, false),
    };

    Line::Entry {
        export,
        key: key.to_string(),
        value: value.to_string(),
        quoted,
    }
}

impl fmt::Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            match line {
                Line::Verbatim(raw) => f.write_str(raw)?,
                Line::Entry {
                    export,
                    key,
                    value,
                    quoted,
                } => {
                    if *export {
                        f.write_str("export ")?;
                    }
                    if *quoted {
                        write!(f, "{key}=\"{value}\"")?;
                    } else {
                        write!(f, "{key}={value}")?;
                    }
                }
            }
        }
        if self.trailing_newline && !self.lines.is_empty() {
            f.write_str("\n")?;
        }
        Ok(())
    }
}
