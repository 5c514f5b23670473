// f90defaults/src/writer.rs

//! Namelist text output for a defaults table or a typed namelist.

use crate::namelist::Namelist;
use crate::options::WriteOptions;
use crate::resolve::DefaultsTable;
use std::io::{self, Write};

/// Text emitted in place of a value when no default was found.
pub const MISSING_DEFAULT_MARKER: &str = "! no default value found";

/// Write every group of `defaults` as a namelist block followed by a blank
/// line:
///
/// ```text
/// &my_nml
///   a = 10
///   e = ! no default value found
/// /
///
/// ```
pub fn write_defaults<W: Write>(
    writer: &mut W,
    defaults: &DefaultsTable,
    options: &WriteOptions,
) -> io::Result<()> {
    for (group, entries) in defaults.groups() {
        writeln!(writer, "&{}", case(group, options))?;
        for entry in entries {
            let member = case(&entry.member, options);
            match &entry.default {
                Some(value) => assignment(writer, &member, value, options)?,
                None => {
                    let indent = &options.indent;
                    writeln!(writer, "{indent}{member} = {MISSING_DEFAULT_MARKER}")?
                }
            }
        }
        writeln!(writer, "/")?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a namelist in the same block layout. Logicals are written as
/// `.true.`/`.false.`, strings single-quoted and arrays comma-separated.
/// Null variables are left out.
pub fn write_namelist<W: Write>(
    writer: &mut W,
    namelist: &Namelist,
    options: &WriteOptions,
) -> io::Result<()> {
    for (group, variables) in namelist.groups() {
        writeln!(writer, "&{}", case(group, options))?;
        for (name, value) in variables.variables() {
            if value.is_null() {
                continue;
            }
            assignment(writer, &case(name, options), value, options)?;
        }
        writeln!(writer, "/")?;
        writeln!(writer)?;
    }
    Ok(())
}

fn assignment<W: Write, V: std::fmt::Display>(
    writer: &mut W,
    name: &str,
    value: V,
    options: &WriteOptions,
) -> io::Result<()> {
    let comma = if options.end_comma { "," } else { "" };
    writeln!(writer, "{}{} = {}{}", options.indent, name, value, comma)
}

/// Render `defaults` to a string.
pub fn defaults_to_string(defaults: &DefaultsTable, options: &WriteOptions) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_defaults(&mut buffer, defaults, options);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn case(name: &str, options: &WriteOptions) -> String {
    if options.uppercase {
        name.to_ascii_uppercase()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_str;
    use crate::options::ExtractOptions;

    const SOURCE: &str = "\
module sample_mod
  implicit none
  integer :: a = 10
  real :: b = 3.14
  logical :: c = .true.
  character(len=20) :: d = \"hello\"
  integer :: e
  namelist /my_nml/ a, b, c, d, e
end module sample_mod
";

    #[test]
    fn test_block_format() {
        let extraction = extract_str(SOURCE, &ExtractOptions::default());
        let text = defaults_to_string(&extraction.defaults, &WriteOptions::default());
        assert_eq!(
            text,
            "\
&my_nml
  a = 10
  b = 3.14
  c = .true.
  d = \"hello\"
  e = ! no default value found
/

"
        );
    }

    #[test]
    fn test_write_options() {
        let extraction = extract_str(SOURCE, &ExtractOptions::default());
        let options = WriteOptions {
            indent: "    ".to_string(),
            end_comma: true,
            uppercase: true,
        };
        let text = defaults_to_string(&extraction.defaults, &options);
        assert!(text.starts_with("&MY_NML\n    A = 10,\n"));
        assert!(text.contains("    E = ! no default value found\n"));
    }

    #[test]
    fn test_namelist_layout() {
        use crate::namelist::NamelistValue;

        let mut nml = Namelist::new();
        nml.insert_group("filter_nml")
            .insert("ens_size", NamelistValue::Integer(3))
            .insert("output_mean", NamelistValue::Logical(false))
            .insert("obs_file", NamelistValue::Character(String::new()))
            .insert("unset", NamelistValue::Null)
            .insert(
                "stages",
                NamelistValue::Array(vec![
                    NamelistValue::Character("input".into()),
                    NamelistValue::Character("output".into()),
                ]),
            );

        let mut buffer = Vec::new();
        write_namelist(&mut buffer, &nml, &WriteOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "\
&filter_nml
  ens_size = 3
  output_mean = .false.
  obs_file = ''
  stages = 'input', 'output'
/

"
        );
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let text = defaults_to_string(&DefaultsTable::new(), &WriteOptions::default());
        assert!(text.is_empty());
    }
}
