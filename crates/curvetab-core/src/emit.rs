//! C header and source generation for a quantized table.

use serde::{Deserialize, Serialize};

use crate::config::{CurveConfig, TableDomain};
use crate::error::{ConfigError, CurveError};
use crate::format::format_table;
use crate::quantize::{ElementType, QuantizedTable};

/// The two generated text files and the names they should be written under.
///
/// The core never touches the filesystem; writing these is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    /// Suggested header file name, `<table_name>.h`.
    pub header_file: String,
    /// Header contents.
    pub header_text: String,
    /// Suggested source file name, `<table_name>.c`.
    pub source_file: String,
    /// Source contents.
    pub source_text: String,
}

/// Emit header and source for `table`.
///
/// # Errors
///
/// - any [`ConfigError`] from [`CurveConfig::validate`], including an
///   unsupported domain
/// - [`ConfigError::TableLengthMismatch`] if the table length differs from
///   the domain
pub fn emit(config: &CurveConfig, table: &QuantizedTable) -> Result<GeneratedArtifacts, CurveError> {
    let domain = config.validate()?;
    if table.len() != domain.size() {
        return Err(ConfigError::TableLengthMismatch {
            expected: domain.size(),
            actual: table.len(),
        }
        .into());
    }
    Ok(render(config, domain, &format_table(table.values())))
}

/// Emit header and source around an already formatted table body.
///
/// # Errors
///
/// Any [`ConfigError`] from [`CurveConfig::validate`]; no text is produced
/// for an invalid configuration.
pub fn emit_with_body(config: &CurveConfig, body: &str) -> Result<GeneratedArtifacts, CurveError> {
    let domain = config.validate()?;
    Ok(render(config, domain, body))
}

fn render(config: &CurveConfig, domain: TableDomain, body: &str) -> GeneratedArtifacts {
    let element = config.element_type();
    let preamble = preamble(config, domain, element);

    GeneratedArtifacts {
        header_file: config.header_file_name(),
        header_text: header(config, domain, element, &preamble),
        source_file: config.source_file_name(),
        source_text: source(config, domain, element, &preamble, body),
    }
}

fn preamble(config: &CurveConfig, domain: TableDomain, element: ElementType) -> String {
    format!(
        "/* This file was autogenerated by curvetab. Do not edit by hand. */\n\
         /* Domain: {size} entries (mask {mask}), range: {range} values ({ctype}) */\n",
        size = domain.size(),
        mask = domain.mask_literal(),
        range = config.range,
        ctype = element.c_type(),
    )
}

fn header(
    config: &CurveConfig,
    domain: TableDomain,
    element: ElementType,
    preamble: &str,
) -> String {
    let name = &config.table_name;
    let upper = config.upper_name();
    let guard = format!("{upper}_H_");

    format!(
        "{preamble}\n\
         #ifndef {guard}\n\
         #define {guard}\n\
         \n\
         #include <stdint.h>\n\
         \n\
         #define {prefix}_{upper}(x) {name}[(x) & {mask}]\n\
         \n\
         extern {ctype} {name}[{size}];\n\
         \n\
         #endif /* {guard} */\n",
        prefix = element.macro_prefix(),
        mask = domain.mask_literal(),
        ctype = element.c_type(),
        size = domain.size(),
    )
}

fn source(
    config: &CurveConfig,
    domain: TableDomain,
    element: ElementType,
    preamble: &str,
    body: &str,
) -> String {
    format!(
        "{preamble}\n\
         #include \"{header}\"\n\
         \n\
         {ctype} {name}[{size}] = {{\n\
         {body}}};\n",
        header = config.header_file_name(),
        ctype = element.c_type(),
        name = config.table_name,
        size = domain.size(),
    )
}
