// f90defaults/tests/extract_tests.rs

use f90defaults::error::Result;
use f90defaults::{
    defaults_to_string, extract_file, reads_namelist, DiagnosticKind, ExtractOptions,
    MemberOrder, MissingDefaults, NamelistValue, WriteOptions,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn render(name: &str, options: &ExtractOptions) -> Result<String> {
    let extraction = extract_file(fixture(name), options)?;
    Ok(defaults_to_string(&extraction.defaults, &WriteOptions::default()))
}

#[test]
fn sample_module_end_to_end() -> Result<()> {
    let text = render("sample_mod.f90", &ExtractOptions::default())?;
    assert_eq!(
        text,
        "&my_nml\n  a = 10\n  b = 3.14\n  c = .true.\n  d = \"hello\"\n/\n\n"
    );

    // Equivalent to `&my_nml a=10, b=3.14, c=.true., d="hello" /`
    let expected = reads_namelist("&my_nml a=10, b=3.14, c=.true., d=\"hello\" /")?;
    assert_eq!(reads_namelist(&text)?, expected);
    Ok(())
}

#[test]
fn numeric_literals_keep_sign_and_format() -> Result<()> {
    let text = render("numeric_forms.f90", &ExtractOptions::default())?;
    let expected = "\
&numeric_nml
  pos_val = 10
  neg_val = -20
  neg_zero = -0
  big_count = 1234567890123
  tiny_val = 1.0e-5
  huge_val = -2.5D+10
  half = .5
  whole = 5.
  dp = 1.0d0
/

&array_nml
  weights = 4*0.25
  offsets = -1, 2, -3
  bounds = -1.0, 1.0e+3
  verbose = .false.
  label = 'it''s here'
/

";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn output_reads_back_to_the_declared_values() -> Result<()> {
    for name in ["sample_mod.f90", "numeric_forms.f90", "dart_model_mod.f90"] {
        let extraction = extract_file(fixture(name), &ExtractOptions::default())?;
        let text = defaults_to_string(&extraction.defaults, &WriteOptions::default());

        let read_back = reads_namelist(&text)?;
        let declared = extraction.defaults.to_namelist()?;
        for (group_name, group) in declared.groups() {
            let read_group = read_back
                .get_group(group_name)
                .unwrap_or_else(|| panic!("{name}: group {group_name} missing on read back"));
            for (var, value) in group.variables() {
                assert_eq!(read_group.get(var), Some(value), "{name}: {group_name}%{var}");
            }
        }
    }
    Ok(())
}

#[test]
fn neg_zero_reads_back_as_zero() -> Result<()> {
    let text = render("numeric_forms.f90", &ExtractOptions::default())?;
    let nml = reads_namelist(&text)?;
    let group = nml.get_group("numeric_nml").expect("numeric_nml group");
    assert_eq!(group.get("neg_zero"), Some(&NamelistValue::Integer(0)));
    assert_eq!(group.get("neg_val"), Some(&NamelistValue::Integer(-20)));
    assert_eq!(group.get("huge_val"), Some(&NamelistValue::Real(-2.5e10)));
    Ok(())
}

#[test]
fn dart_style_module() -> Result<()> {
    let extraction = extract_file(fixture("dart_model_mod.f90"), &ExtractOptions::default())?;
    let text = defaults_to_string(&extraction.defaults, &WriteOptions::default());
    let expected = "\
&model_nml
  model_state_variables = 9*' '
  template_file = 'mom6.r.nc'
  static_file = \"c.e22.GMOM.T62_g16.nuopc.001.mom6.static.nc\"
  ocean_geometry = 'ocean_geometry.nc'
  assimilation_period_days = -1
  assimilation_period_seconds = 3600
  use_pseudo_depth = .false.
  model_perturbation_amplitude = 0.2
  missing_fill = -888888.0
  debug = 0
  computed_amplitude = ! no default value found
  unset_counter = ! no default value found
  not_declared_here = ! no default value found
/

";
    assert_eq!(text, expected);

    let kinds: Vec<&DiagnosticKind> = extraction.diagnostics.iter().map(|d| &d.kind).collect();
    assert_eq!(kinds.len(), 3);
    assert!(matches!(
        kinds[0],
        DiagnosticKind::UnresolvedDefault { member, expression, .. }
            if member == "computed_amplitude" && expression == "2.0_r8 * MISSING"
    ));
    assert!(matches!(
        kinds[1],
        DiagnosticKind::MissingDefault { member, .. } if member == "unset_counter"
    ));
    assert!(matches!(
        kinds[2],
        DiagnosticKind::UndeclaredMember { member, .. } if member == "not_declared_here"
    ));
    Ok(())
}

#[test]
fn undeclared_members_are_handled_the_same_way_every_time() -> Result<()> {
    let options = ExtractOptions {
        missing_defaults: MissingDefaults::Omit,
        member_order: MemberOrder::Namelist,
        ..ExtractOptions::default()
    };
    let first = render("dart_model_mod.f90", &options)?;
    let second = render("dart_model_mod.f90", &options)?;
    assert_eq!(first, second);
    assert!(!first.contains("not_declared_here"));
    assert!(!first.contains("no default value found"));
    assert!(first.starts_with("&model_nml\n  template_file = 'mom6.r.nc'\n"));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = extract_file(fixture("does_not_exist.f90"), &ExtractOptions::default());
    let err = result.expect_err("missing file must fail");
    assert!(err.to_string().contains("does_not_exist.f90"));
}
