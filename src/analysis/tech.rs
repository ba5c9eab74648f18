const EXTENSION_TO_TECH: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "React (TypeScript)"),
    ("jsx", "React (JavaScript)"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("scala", "Scala"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("hpp", "C++"),
    ("cs", "C#"),
    ("sql", "SQL"),
    ("css", "CSS"),
    ("scss", "CSS"),
    ("html", "HTML"),
    ("sh", "Shell"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("json", "JSON"),
    ("toml", "TOML"),
    ("tf", "Terraform"),
    ("proto", "Protocol Buffers"),
    ("graphql", "GraphQL"),
];

/// Infers a technology name from a path, `None` for unknown extensions.
pub fn tech_for_path(path: &str) -> Option<&'static str> {
    let filename = path
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .to_lowercase();
    if filename == "dockerfile" || filename.ends_with(".dockerfile") {
        return Some("Docker");
    }

    let (stem, extension) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    EXTENSION_TO_TECH
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, tech)| *tech)
}
