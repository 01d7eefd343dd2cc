use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Matches a Swift import declaration at the start of a line.
///
/// Leading whitespace and any mix of `@_spi(Name)`, `@_exported` and
/// `@testable` attributes may precede `import`; an optional import kind
/// (`import struct Foo.Bar`) may follow it. Capture group 1 is the module.
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:(?:@_spi\(\w+\)|@_exported|@testable)\s+)*",
        r"\s*import\s+",
        r"(?:(?:typealias|struct|class|enum|protocol|let|var|func)\s+)?",
        r"(\w+)",
    ))
    .expect("import line pattern is valid")
});

/// Extracts the imported module name from one line of source, if the line
/// is an import declaration.
pub fn extract_module(line: &str) -> Option<&str> {
    let module = IMPORT_LINE.captures(line)?.get(1)?.as_str();
    trace!("Matched import of '{}' in line: {}", module, line);
    Some(module)
}
