//! `"path"` / `"path:Block"` template specs.

/// A template file plus the block to render from it. An empty block means the
/// whole file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateSpec {
    pub file: String,
    pub block: String,
}

impl TemplateSpec {
    /// Split on the last `:`. Without one, the block is the file's base name;
    /// with one, the part after it is the block verbatim, possibly empty.
    ///
    /// - `"Home"` -> (`Home`, `Home`)
    /// - `"games/GameList"` -> (`games/GameList`, `GameList`)
    /// - `"games/GameList:Rows"` -> (`games/GameList`, `Rows`)
    /// - `"games/GameList:"` -> (`games/GameList`, ``)
    pub fn parse(spec: &str) -> Self {
        match spec.rfind(':') {
            Some(idx) => TemplateSpec {
                file: spec[..idx].to_string(),
                block: spec[idx + 1..].to_string(),
            },
            None => TemplateSpec {
                file: spec.to_string(),
                block: base_name(spec).to_string(),
            },
        }
    }

    /// Default identity for a view registered without an explicit template.
    pub fn for_view(name: &str) -> Self {
        TemplateSpec {
            file: name.to_string(),
            block: base_name(name).to_string(),
        }
    }
}

impl std::fmt::Display for TemplateSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.file, self.block)
    }
}

/// Part after the last `/`, or the whole path.
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
