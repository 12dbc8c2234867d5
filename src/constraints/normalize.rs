use crate::{
    constraints::{
        ConstraintSpec, Constraints, Incumbency, StatusQuo, Vra,
        DEFAULT_POW_VRA, DEFAULT_TGT_VRA_MIN, DEFAULT_TGT_VRA_OTHER,
    },
    error::{EnsembleError, Result, ensure_config},
};

/// Fill in every missing constraint group or field and validate the result.
///
/// Absent groups are disabled (strength 0). A status-quo plan whose smallest
/// label is 0 is shifted up so labels start at 1.
pub fn normalize_constraints(spec: &ConstraintSpec, num_units: usize) -> Result<Constraints> {
    let constraints = Constraints {
        status_quo: normalize_status_quo(spec, num_units)?,
        vra: normalize_vra(spec, num_units)?,
        incumbency: normalize_incumbency(spec, num_units)?,
    };

    Ok(constraints)
}

fn check_strength(group: &str, strength: f64) -> Result<f64> {
    ensure_config!(strength.is_finite() && strength >= 0.0,
        "{group}.strength must be a non-negative number, got {strength}");
    Ok(strength)
}

fn normalize_status_quo(spec: &ConstraintSpec, num_units: usize) -> Result<StatusQuo> {
    let group = spec.status_quo.clone().unwrap_or_default();
    let strength = check_strength("status_quo", group.strength.unwrap_or(0.0))?;

    let mut current = group.current.unwrap_or_else(|| vec![1; num_units]);
    ensure_config!(current.len() == num_units,
        "status_quo.current has length {}, expected {num_units}", current.len());

    if current.iter().min() == Some(&0) {
        current.iter_mut().for_each(|label| *label += 1);
    }
    let n_current = current.iter().copied().max().unwrap_or(1);

    Ok(StatusQuo { strength, current, n_current })
}

fn normalize_vra(spec: &ConstraintSpec, num_units: usize) -> Result<Vra> {
    let group = spec.vra.clone().unwrap_or_default();
    let strength = check_strength("vra", group.strength.unwrap_or(0.0))?;

    let tgt_vra_min = group.tgt_vra_min.unwrap_or(DEFAULT_TGT_VRA_MIN);
    let tgt_vra_other = group.tgt_vra_other.unwrap_or(DEFAULT_TGT_VRA_OTHER);
    let pow_vra = group.pow_vra.unwrap_or(DEFAULT_POW_VRA);
    ensure_config!((0.0..=1.0).contains(&tgt_vra_min), "vra.tgt_vra_min must be in [0, 1], got {tgt_vra_min}");
    ensure_config!((0.0..=1.0).contains(&tgt_vra_other), "vra.tgt_vra_other must be in [0, 1], got {tgt_vra_other}");
    ensure_config!(pow_vra.is_finite() && pow_vra > 0.0, "vra.pow_vra must be positive, got {pow_vra}");

    let min_pop = group.min_pop.unwrap_or_else(|| vec![0; num_units]);
    ensure_config!(min_pop.len() == num_units,
        "vra.min_pop has length {}, expected {num_units}", min_pop.len());

    Ok(Vra { strength, tgt_vra_min, tgt_vra_other, pow_vra, min_pop })
}

fn normalize_incumbency(spec: &ConstraintSpec, num_units: usize) -> Result<Incumbency> {
    let group = spec.incumbency.clone().unwrap_or_default();
    let strength = check_strength("incumbency", group.strength.unwrap_or(0.0))?;

    let incumbents = group.incumbents.unwrap_or_default();
    if let Some(&bad) = incumbents.iter().find(|&&unit| unit >= num_units) {
        return Err(EnsembleError::Config(format!(
            "incumbency.incumbents refers to unit {bad}, but there are only {num_units} units"
        )));
    }

    Ok(Incumbency { strength, incumbents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{IncumbencySpec, StatusQuoSpec, VraSpec};

    #[test]
    fn empty_spec_fills_defaults() {
        let constraints = normalize_constraints(&ConstraintSpec::default(), 4).unwrap();

        assert_eq!(constraints.status_quo.strength, 0.0);
        assert_eq!(constraints.status_quo.current, vec![1; 4]);
        assert_eq!(constraints.status_quo.n_current, 1);

        assert_eq!(constraints.vra.strength, 0.0);
        assert_eq!(constraints.vra.tgt_vra_min, 0.55);
        assert_eq!(constraints.vra.tgt_vra_other, 0.25);
        assert_eq!(constraints.vra.pow_vra, 1.5);
        assert_eq!(constraints.vra.min_pop, vec![0; 4]);

        assert_eq!(constraints.incumbency.strength, 0.0);
        assert!(constraints.incumbency.incumbents.is_empty());
        assert!(!constraints.any_active());
    }

    #[test]
    fn zero_based_status_quo_is_shifted() {
        let spec = ConstraintSpec {
            status_quo: Some(StatusQuoSpec { strength: Some(2.0), current: Some(vec![0, 0, 1, 2]) }),
            ..Default::default()
        };
        let constraints = normalize_constraints(&spec, 4).unwrap();

        assert_eq!(constraints.status_quo.current, vec![1, 1, 2, 3]);
        assert_eq!(constraints.status_quo.n_current, 3);
        assert!(constraints.any_active());
    }

    #[test]
    fn one_based_status_quo_is_untouched() {
        let spec = ConstraintSpec {
            status_quo: Some(StatusQuoSpec { strength: None, current: Some(vec![2, 1, 2]) }),
            ..Default::default()
        };
        let constraints = normalize_constraints(&spec, 3).unwrap();

        assert_eq!(constraints.status_quo.current, vec![2, 1, 2]);
        assert_eq!(constraints.status_quo.n_current, 2);
    }

    #[test]
    fn partial_vra_group_keeps_other_defaults() {
        let spec = ConstraintSpec {
            vra: Some(VraSpec { strength: Some(10.0), tgt_vra_min: Some(0.6), min_pop: Some(vec![1, 2, 3]), ..Default::default() }),
            ..Default::default()
        };
        let constraints = normalize_constraints(&spec, 3).unwrap();

        assert_eq!(constraints.vra.tgt_vra_min, 0.6);
        assert_eq!(constraints.vra.tgt_vra_other, 0.25);
        assert_eq!(constraints.vra.min_pop, vec![1, 2, 3]);
    }

    #[test]
    fn mismatched_min_pop_is_config_error() {
        let spec = ConstraintSpec {
            vra: Some(VraSpec { min_pop: Some(vec![1, 2]), ..Default::default() }),
            ..Default::default()
        };
        let err = normalize_constraints(&spec, 3).unwrap_err();
        assert!(matches!(err, EnsembleError::Config(msg) if msg.contains("min_pop")));
    }

    #[test]
    fn negative_strength_is_rejected() {
        let spec = ConstraintSpec {
            incumbency: Some(IncumbencySpec { strength: Some(-1.0), incumbents: None }),
            ..Default::default()
        };
        assert!(normalize_constraints(&spec, 3).is_err());
    }

    #[test]
    fn out_of_range_incumbent_is_rejected() {
        let spec = ConstraintSpec {
            incumbency: Some(IncumbencySpec { strength: Some(1.0), incumbents: Some(vec![0, 3]) }),
            ..Default::default()
        };
        assert!(normalize_constraints(&spec, 3).is_err());
    }

    #[test]
    fn spec_parses_from_json() {
        let json = r#"{
            "status_quo": { "strength": 1.0, "current": [0, 1, 1] },
            "incumbency": { "incumbents": [2] }
        }"#;
        let spec: ConstraintSpec = serde_json::from_str(json).unwrap();
        let constraints = normalize_constraints(&spec, 3).unwrap();

        assert_eq!(constraints.status_quo.current, vec![1, 2, 2]);
        assert_eq!(constraints.incumbency.incumbents, vec![2]);
        assert_eq!(constraints.incumbency.strength, 0.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<ConstraintSpec>(r#"{ "partisan": {} }"#).is_err());
    }
}
