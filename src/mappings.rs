//! Obfuscation mapping parsing
//!
//! Mapping text is cached verbatim and parsed on every retrieval, so parsers
//! must be pure functions of the text. [`ProguardParser`] handles the
//! ProGuard format published alongside client jars:
//!
//! ```text
//! # comment
//! net.minecraft.Util -> ad:
//!     int MAX_LENGTH -> a
//!     12:14:java.lang.String getName(int,java.lang.String):56:58 -> b
//! ```

use crate::core::error::{FetchError, Result};
use std::collections::HashMap;

/// Turns raw mapping text into a structured mapping.
pub trait MappingParser {
    type Output;

    fn parse(&self, text: &str) -> Result<Self::Output>;
}

/// Parser for ProGuard mapping files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProguardParser;

impl MappingParser for ProguardParser {
    type Output = ProguardMappings;

    fn parse(&self, text: &str) -> Result<ProguardMappings> {
        ProguardMappings::parse(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub name: String,
    pub obfuscated: String,
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMapping {
    pub name: String,
    pub obfuscated: String,
    pub return_type: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    pub name: String,
    pub obfuscated: String,
    pub fields: Vec<FieldMapping>,
    pub methods: Vec<MethodMapping>,
}

impl ClassMapping {
    pub fn field(&self, obfuscated: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.obfuscated == obfuscated)
    }

    /// Overloads may share an obfuscated name, hence the iterator.
    pub fn methods(&self, obfuscated: &str) -> impl Iterator<Item = &MethodMapping> {
        self.methods.iter().filter(move |m| m.obfuscated == obfuscated)
    }
}

/// Parsed ProGuard mappings, indexed both ways by class name.
#[derive(Debug, Clone, Default)]
pub struct ProguardMappings {
    classes: Vec<ClassMapping>,
    by_obfuscated: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl ProguardMappings {
    pub fn parse(text: &str) -> Result<Self> {
        let mut mappings = ProguardMappings::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if raw.starts_with(char::is_whitespace) {
                let class = mappings
                    .classes
                    .last_mut()
                    .ok_or_else(|| err(line_no, "member line before any class line"))?;
                parse_member(trimmed, line_no, class)?;
            } else {
                let class = parse_class(trimmed, line_no)?;
                let index = mappings.classes.len();
                mappings.by_obfuscated.insert(class.obfuscated.clone(), index);
                mappings.by_name.insert(class.name.clone(), index);
                mappings.classes.push(class);
            }
        }

        Ok(mappings)
    }

    pub fn class_by_obfuscated(&self, obfuscated: &str) -> Option<&ClassMapping> {
        self.by_obfuscated.get(obfuscated).map(|&i| &self.classes[i])
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassMapping> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }

    pub fn classes(&self) -> &[ClassMapping] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn err(line: usize, message: impl Into<String>) -> FetchError {
    FetchError::MappingParse {
        line,
        message: message.into(),
    }
}

fn parse_class(line: &str, line_no: usize) -> Result<ClassMapping> {
    let (name, rest) = line
        .split_once(" -> ")
        .ok_or_else(|| err(line_no, "expected `name -> obfuscated:`"))?;
    let obfuscated = rest
        .strip_suffix(':')
        .ok_or_else(|| err(line_no, "class line must end with ':'"))?;
    if name.is_empty() || obfuscated.is_empty() {
        return Err(err(line_no, "empty class name"));
    }
    Ok(ClassMapping {
        name: name.to_string(),
        obfuscated: obfuscated.to_string(),
        fields: Vec::new(),
        methods: Vec::new(),
    })
}

/// `12:14:` line-number prefix on inlined methods
fn strip_line_numbers(s: &str) -> &str {
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return s;
    }
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(rest))
            if a.chars().all(|c| c.is_ascii_digit()) && b.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest
        }
        _ => s,
    }
}

fn parse_member(line: &str, line_no: usize, class: &mut ClassMapping) -> Result<()> {
    let (lhs, obfuscated) = line
        .split_once(" -> ")
        .ok_or_else(|| err(line_no, "expected `member -> obfuscated`"))?;
    let lhs = strip_line_numbers(lhs.trim());
    let obfuscated = obfuscated.trim().to_string();

    let (ty, rest) = lhs
        .split_once(' ')
        .ok_or_else(|| err(line_no, "member needs a type and a name"))?;

    if let Some((name, after)) = rest.split_once('(') {
        let (args, _) = after
            .split_once(')')
            .ok_or_else(|| err(line_no, "unterminated argument list"))?;
        class.methods.push(MethodMapping {
            name: name.to_string(),
            obfuscated,
            return_type: ty.to_string(),
            args: args
                .split(',')
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        });
    } else {
        class.fields.push(FieldMapping {
            name: rest.to_string(),
            obfuscated,
            field_type: ty.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# {\"id\":\"sourceFile\",\"fileName\":\"Util.java\"}
net.minecraft.Util -> ad:
    int MAX_LENGTH -> a
    java.util.concurrent.ExecutorService BOOTSTRAP_EXECUTOR -> b
    1:5:void <init>() -> <init>
    23:45:java.lang.String getName(int,java.lang.String):67:89 -> a
    long getMillis() -> c
net.minecraft.Util$1 -> ad$1:
    void run() -> run
";

    #[test]
    fn test_parse_classes() {
        let mappings = ProguardMappings::parse(SAMPLE).unwrap();
        assert_eq!(mappings.len(), 2);

        let util = mappings.class_by_obfuscated("ad").unwrap();
        assert_eq!(util.name, "net.minecraft.Util");
        assert_eq!(
            mappings.class_by_name("net.minecraft.Util$1").unwrap().obfuscated,
            "ad$1"
        );
        assert!(mappings.class_by_obfuscated("zz").is_none());
    }

    #[test]
    fn test_parse_fields() {
        let mappings = ProguardMappings::parse(SAMPLE).unwrap();
        let util = mappings.class_by_obfuscated("ad").unwrap();

        let field = util.field("b").unwrap();
        assert_eq!(field.name, "BOOTSTRAP_EXECUTOR");
        assert_eq!(field.field_type, "java.util.concurrent.ExecutorService");
        assert_eq!(util.fields.len(), 2);
    }

    #[test]
    fn test_parse_methods_with_line_numbers() {
        let mappings = ProguardMappings::parse(SAMPLE).unwrap();
        let util = mappings.class_by_obfuscated("ad").unwrap();

        let get_name: Vec<_> = util.methods("a").collect();
        assert_eq!(get_name.len(), 1);
        assert_eq!(get_name[0].name, "getName");
        assert_eq!(get_name[0].return_type, "java.lang.String");
        assert_eq!(get_name[0].args, vec!["int", "java.lang.String"]);

        let millis: Vec<_> = util.methods("c").collect();
        assert_eq!(millis[0].name, "getMillis");
        assert!(millis[0].args.is_empty());
    }

    #[test]
    fn test_member_before_class_is_error() {
        let err = ProguardMappings::parse("    int a -> b\n").unwrap_err();
        assert!(matches!(err, FetchError::MappingParse { line: 1, .. }));
    }

    #[test]
    fn test_bad_class_line_reports_line_number() {
        let text = "a.B -> c:\n    int x -> y\nbroken line\n";
        let err = ProguardMappings::parse(text).unwrap_err();
        assert!(matches!(err, FetchError::MappingParse { line: 3, .. }));
    }

    #[test]
    fn test_parser_is_repeatable() {
        let a = ProguardParser.parse(SAMPLE).unwrap();
        let b = ProguardParser.parse(SAMPLE).unwrap();
        assert_eq!(a.classes(), b.classes());
    }

    #[test]
    fn test_empty_text() {
        let mappings = ProguardMappings::parse("").unwrap();
        assert!(mappings.is_empty());
    }
}
