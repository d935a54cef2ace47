//! minijinja environment with a layered directory loader and default helpers.

use crate::config::TemplateConfig;
use minijinja::{Environment, Error, ErrorKind, Value};
use std::path::{Component, Path, PathBuf};

/// Environment that loads templates from `config.dirs`, trying each directory in
/// order, with the default helpers registered.
pub fn setup_templates(config: &TemplateConfig) -> Environment<'static> {
    let mut env = Environment::new();
    let dirs = config.dirs.clone();
    env.set_loader(move |name| load_from_dirs(&dirs, name));
    register_defaults(&mut env);
    env
}

fn load_from_dirs(dirs: &[PathBuf], name: &str) -> Result<Option<String>, Error> {
    let Some(rel) = safe_relative(name) else {
        return Ok(None);
    };
    for dir in dirs {
        let path = dir.join(&rel);
        match std::fs::read_to_string(&path) {
            Ok(source) => return Ok(Some(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::error!("template load error: {} - {}", path.display(), e);
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {}", path.display()),
                )
                .with_source(e));
            }
        }
    }
    Ok(None)
}

/// `name` as a relative path that stays inside the template directory.
fn safe_relative(name: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for comp in Path::new(name).components() {
        match comp {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Helpers every app gets: `to_json(v)`, `dict_set(d, k, v)` and the
/// `indented` filter.
pub fn register_defaults(env: &mut Environment<'static>) {
    env.add_function("to_json", to_json);
    env.add_function("dict_set", dict_set);
    env.add_filter("indented", indented);
}

fn to_json(value: Value) -> Value {
    match serde_json::to_string(&value) {
        Ok(json) => Value::from_safe_string(json),
        Err(e) => {
            tracing::warn!("error marshaling to JSON: {}", e);
            Value::from_safe_string("null".to_string())
        }
    }
}

fn dict_set(dict: Value, key: String, value: Value) -> Result<Value, Error> {
    let mut out = std::collections::BTreeMap::new();
    if !dict.is_undefined() && !dict.is_none() {
        let keys = dict.try_iter()?;
        for k in keys {
            let v = dict.get_item(&k)?;
            out.insert(k.to_string(), v);
        }
    }
    out.insert(key, value);
    Ok(Value::from(out))
}

fn indented(code: String) -> Value {
    let lines: Vec<&str> = code.trim().lines().collect();
    Value::from_safe_string(lines.join("<br/>"))
}
