//! Module import paths from `go.mod`.

use std::path::Path;

/// Import path of the package in `dir`: the `module` path of the nearest
/// enclosing `go.mod` joined with the directory's relative path.
pub fn package_import_path(dir: &Path) -> Option<String> {
    let dir = std::path::absolute(dir).ok()?;
    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join("go.mod");
        let Ok(contents) = std::fs::read_to_string(&go_mod) else {
            continue;
        };
        let module = module_path(&contents)?;
        let relative = dir.strip_prefix(ancestor).ok()?;
        let mut path = module.to_string();
        for component in relative.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
        return Some(path);
    }
    None
}

/// The `module` directive of a go.mod file.
pub fn module_path(contents: &str) -> Option<&str> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then_some(module)
    })
}
