//! Static language-name to file-extension table used to resolve the
//! optional language filter. Unknown names are the caller's configuration
//! error, not a traversal failure.

/// Looks up the extensions for a language name, case-insensitively.
pub fn extensions_for(language: &str) -> Option<&'static [&'static str]> {
    let entry = LANGUAGE_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == language.to_lowercase())?;
    Some(entry.1)
}

const LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("python", &[".py"]),
    ("javascript", &[".js", ".jsx"]),
    ("typescript", &[".ts", ".tsx"]),
    ("java", &[".java"]),
    ("csharp", &[".cs"]),
    ("c++", &[".cpp", ".h"]),
    ("c", &[".c", ".h"]),
    ("ruby", &[".rb"]),
    ("go", &[".go"]),
    ("php", &[".php"]),
    ("html", &[".html", ".htm"]),
    ("css", &[".css"]),
    ("bash", &[".sh"]),
    ("kotlin", &[".kt", ".kts"]),
    ("swift", &[".swift"]),
    ("rust", &[".rs"]),
    ("scala", &[".scala"]),
    ("perl", &[".pl"]),
    ("lua", &[".lua"]),
    ("dart", &[".dart"]),
    ("elixir", &[".ex", ".exs"]),
    ("haskell", &[".hs"]),
    ("shell", &[".sh", ".bash"]),
    ("powershell", &[".ps1"]),
    ("sql", &[".sql"]),
    ("pascal", &[".pas"]),
    ("objective-c", &[".m", ".h"]),
    ("r", &[".r"]),
    ("julia", &[".jl"]),
];
