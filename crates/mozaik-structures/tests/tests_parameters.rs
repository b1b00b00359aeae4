//! Tests for parameter documents loaded from TOML and validated against declared trees

use mozaik_structures::*;

const SHEET_PARAMETERS: &str = r#"
name = "V1_Exc_L4"
density = 1500.0
mpi_safe = false

[cell]
model = "IF_cond_exp"

[cell.params]
tau_m = 20.0
v_thresh = -50.0
"#;

fn sheet_requirements() -> RequiredParameters {
    RequiredParameters::new()
        .with("name", ParameterKind::Str)
        .with("density", ParameterKind::Float)
        .with("mpi_safe", ParameterKind::Bool)
        .with_section(
            "cell",
            RequiredParameters::new().with("model", ParameterKind::Str).with_section(
                "params",
                RequiredParameters::new()
                    .with("tau_m", ParameterKind::Float)
                    .with("v_thresh", ParameterKind::Float),
            ),
        )
}

#[test]
fn test_toml_document_validates() {
    let parameters: ParameterSet = toml::from_str(SHEET_PARAMETERS).unwrap();
    check_parameters("Sheet", &sheet_requirements(), &parameters).unwrap();
    assert_eq!(parameters.get_f64("cell.params.v_thresh").unwrap(), -50.0);
    assert_eq!(parameters.get_str("cell.model").unwrap(), "IF_cond_exp");
}

#[test]
fn test_deeply_nested_mismatch_reports_full_section() {
    let document = SHEET_PARAMETERS.replace("v_thresh = -50.0", "v_reset = -70.0");
    let parameters: ParameterSet = toml::from_str(&document).unwrap();
    let err = check_parameters("Sheet", &sheet_requirements(), &parameters).unwrap_err();
    match err {
        MozaikError::InvalidParameterKeys { owner, section, required, supplied } => {
            assert_eq!(owner, "Sheet");
            assert_eq!(section, "cell.params");
            assert_eq!(required, vec!["tau_m".to_string(), "v_thresh".to_string()]);
            assert_eq!(supplied, vec!["tau_m".to_string(), "v_reset".to_string()]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_error_message_names_owner_and_keys() {
    let parameters = ParameterSet::new().with("name", "V1");
    let err = check_parameters("Sheet", &sheet_requirements(), &parameters).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Invalid parameters for Sheet."));
    assert!(message.contains("density"));
}

#[test]
fn test_empty_requirements_accept_only_empty_set() {
    let required = RequiredParameters::new();
    assert!(check_parameters("Null", &required, &ParameterSet::new()).is_ok());
    assert!(check_parameters("Null", &required, &ParameterSet::new().with("a", 1.0)).is_err());
}
