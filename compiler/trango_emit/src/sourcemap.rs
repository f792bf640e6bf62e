//! Source maps.
//!
//! The emitter records one raw mapping per emitted statement or
//! declaration that has a non-synthetic location. Mappings stay raw
//! (position quadruples); VLQ encoding is a downstream concern. JSON is
//! built by hand, matching the diagnostic JSON emitter's approach.

/// One raw mapping: a generated position back to an original one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawMapping {
    pub generated_line: u32,
    pub generated_column: u32,
    /// Index into `SourceMap::sources`.
    pub source: u32,
    pub original_line: u32,
    pub original_column: u32,
    /// Index into `SourceMap::names`, if the mapping carries one.
    pub name: Option<u32>,
}

/// A version-3 source map with raw (un-encoded) mappings.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SourceMap {
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: Vec<RawMapping>,
    pub sources_content: Vec<Option<String>>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap::default()
    }

    /// Intern a source path, returning its index.
    pub fn add_source(&mut self, path: &str) -> u32 {
        if let Some(index) = self.sources.iter().position(|s| s == path) {
            return u32::try_from(index).unwrap_or(0);
        }
        self.sources.push(path.to_string());
        self.sources_content.push(None);
        u32::try_from(self.sources.len() - 1).unwrap_or(0)
    }

    /// Intern a symbol name, returning its index.
    pub fn add_name(&mut self, name: &str) -> u32 {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return u32::try_from(index).unwrap_or(0);
        }
        self.names.push(name.to_string());
        u32::try_from(self.names.len() - 1).unwrap_or(0)
    }

    /// Record one mapping.
    pub fn record(&mut self, mapping: RawMapping) {
        self.mappings.push(mapping);
    }

    /// Render the version-3 JSON object. Mappings are emitted as raw
    /// segment arrays rather than VLQ text.
    pub fn to_json(&self) -> String {
        let mut out = String::from("{\n  \"version\": 3,\n  \"sources\": [");
        push_string_array(&mut out, &self.sources);
        out.push_str("],\n  \"names\": [");
        push_string_array(&mut out, &self.names);
        out.push_str("],\n  \"mappings\": [");
        for (i, mapping) in self.mappings.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('[');
            out.push_str(&mapping.generated_line.to_string());
            out.push_str(", ");
            out.push_str(&mapping.generated_column.to_string());
            out.push_str(", ");
            out.push_str(&mapping.source.to_string());
            out.push_str(", ");
            out.push_str(&mapping.original_line.to_string());
            out.push_str(", ");
            out.push_str(&mapping.original_column.to_string());
            if let Some(name) = mapping.name {
                out.push_str(", ");
                out.push_str(&name.to_string());
            }
            out.push(']');
        }
        out.push_str("],\n  \"sourcesContent\": [");
        for (i, content) in self.sources_content.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match content {
                Some(text) => {
                    out.push('"');
                    out.push_str(&escape(text));
                    out.push('"');
                }
                None => out.push_str("null"),
            }
        }
        out.push_str("]\n}\n");
        out
    }
}

fn push_string_array(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('"');
        out.push_str(&escape(item));
        out.push('"');
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
