use cloth_core::cloth::Cloth;
use cloth_core::config::{ClothConfig, CutPolicy};
use cloth_core::error::ClothError;

#[test]
fn test_default_config_is_valid() {
    let config = ClothConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.physics_accuracy, 3);
    assert_eq!(config.damping, 0.99);
    assert_eq!(config.time_step, 0.016);
    assert_eq!(config.cut_policy, CutPolicy::Overstretched);
}

#[test]
fn test_for_canvas_derives_grid_width() {
    let config = ClothConfig::for_canvas(1400.0, 900.0);
    assert_eq!(config.cloth_width, 100);
    assert_eq!(config.cloth_height, 60);
    assert_eq!(config.canvas_width, 1400.0);
    assert_eq!(config.canvas_height, 900.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_spacing_rejected() {
    let config = ClothConfig {
        spacing: 0.0,
        ..ClothConfig::default()
    };
    assert_eq!(config.validate(), Err(ClothError::InvalidSpacing(0.0)));
    assert!(Cloth::new(config).is_err());
}

#[test]
fn test_negative_spacing_rejected() {
    let config = ClothConfig {
        spacing: -4.0,
        ..ClothConfig::default()
    };
    assert!(matches!(config.validate(), Err(ClothError::InvalidSpacing(_))));
}

#[test]
fn test_empty_grid_rejected() {
    let config = ClothConfig {
        cloth_width: 0,
        ..ClothConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ClothError::InvalidGridDimensions { width: 0, height: 30 })
    );
}

#[test]
fn test_oversized_grid_rejected() {
    let config = ClothConfig {
        cloth_width: usize::MAX,
        ..ClothConfig::default()
    };
    assert_eq!(config.point_count(), None);
    assert_eq!(
        config.validate(),
        Err(ClothError::InvalidGridDimensions { width: usize::MAX, height: 30 })
    );

    // Fits usize on 64-bit targets but not 32-bit handles.
    let config = ClothConfig {
        cloth_width: 1 << 20,
        cloth_height: 1 << 20,
        ..ClothConfig::default()
    };
    assert!(matches!(config.validate(), Err(ClothError::InvalidGridDimensions { .. })));
}

#[test]
fn test_point_count_matches_lattice() {
    let config = ClothConfig {
        cloth_width: 2,
        cloth_height: 3,
        ..ClothConfig::default()
    };
    assert_eq!(config.point_count(), Some(12));
}

#[test]
fn test_short_tear_distance_is_allowed() {
    let config = ClothConfig {
        tear_distance: 10.0,
        spacing: 12.0,
        ..ClothConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_non_positive_tear_distance_rejected() {
    let config = ClothConfig {
        tear_distance: 0.0,
        ..ClothConfig::default()
    };
    assert_eq!(config.validate(), Err(ClothError::InvalidTearDistance(0.0)));

    let config = ClothConfig {
        tear_distance: f32::NAN,
        ..ClothConfig::default()
    };
    assert!(matches!(config.validate(), Err(ClothError::InvalidTearDistance(_))));
}

#[test]
fn test_degenerate_canvas_rejected() {
    let config = ClothConfig {
        canvas_width: 2.0,
        ..ClothConfig::default()
    };
    assert!(matches!(config.validate(), Err(ClothError::InvalidCanvas { .. })));

    let config = ClothConfig {
        canvas_height: f32::NAN,
        ..ClothConfig::default()
    };
    assert!(matches!(config.validate(), Err(ClothError::InvalidCanvas { .. })));
}

#[test]
fn test_other_parameters_rejected() {
    let zero_iterations = ClothConfig {
        physics_accuracy: 0,
        ..ClothConfig::default()
    };
    assert_eq!(zero_iterations.validate(), Err(ClothError::InvalidIterations));

    let bad_damping = ClothConfig {
        damping: 1.5,
        ..ClothConfig::default()
    };
    assert_eq!(bad_damping.validate(), Err(ClothError::InvalidDamping(1.5)));

    let bad_radius = ClothConfig {
        mouse_cut: -1.0,
        ..ClothConfig::default()
    };
    assert_eq!(bad_radius.validate(), Err(ClothError::InvalidRadius(-1.0)));

    let bad_step = ClothConfig {
        time_step: 0.0,
        ..ClothConfig::default()
    };
    assert_eq!(bad_step.validate(), Err(ClothError::InvalidTimeStep(0.0)));

    let bad_gravity = ClothConfig {
        gravity: f32::INFINITY,
        ..ClothConfig::default()
    };
    assert!(matches!(bad_gravity.validate(), Err(ClothError::InvalidGravity(_))));
}

#[test]
fn test_zero_gravity_is_allowed() {
    let config = ClothConfig {
        gravity: 0.0,
        ..ClothConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_are_readable() {
    let e = ClothError::PointOutOfBounds { index: 12, count: 9 };
    assert_eq!(e.to_string(), "point index 12 out of bounds (count: 9)");
    assert_eq!(ClothError::Stopped.to_string(), "simulation has been stopped");
}
