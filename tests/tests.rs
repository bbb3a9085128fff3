use archimede::simulation::forces::{BodySample, Force, ForceSet, LinearDrag};
use archimede::simulation::integrator::{buoyant_step, regime_at, sphere_volume, submerged_fraction, Regime, SphereBody};
use archimede::simulation::params::{Parameters, WATER_DENSITY};
use archimede::simulation::states::Animation;
use archimede::{Color, Point, PointExt, SimError, Sphere, Vector, VectorExt};

/// Kinematic state of a body centered at `(x, y, z)`, at rest
pub fn sphere_anim(x: f64, y: f64, z: f64) -> Animation {
    Animation::at(Point::new(x, y, z))
}

pub fn water_body(radius: f64) -> SphereBody {
    SphereBody {
        radius,
        density: WATER_DENSITY,
    }
}

/// Default tank parameters: water at 0.45, rho_w = 1000, c_d = 0.5
pub fn test_params() -> Parameters {
    Parameters::default()
}

// ==================================================================================
// Vector / point tests
// ==================================================================================

#[test]
fn integral_scales_rate_by_dt() {
    let v = Vector::new(1.0, -2.0, 4.0);
    assert_eq!(v.integral(0.5), Vector::new(0.5, -1.0, 2.0));
    assert_eq!(v.integral(0.0), Vector::zeros());
}

#[test]
fn point_difference_and_translation() {
    let a = Point::new(1.0, 2.0, 3.0);
    let b = Point::new(0.0, 4.0, 3.0);
    let d: Vector = a - b;
    assert_eq!(d, Vector::new(1.0, -2.0, 0.0));

    let mut c = b;
    c.translate(&d);
    assert_eq!(c, a);
    assert_eq!(b + d, a);
}

#[test]
fn unit_rejects_zero_vector() {
    assert_eq!(Vector::zeros().unit(), Err(SimError::DegenerateDirection));

    let u = Vector::new(3.0, 0.0, 4.0).unit().unwrap();
    assert!((u.norm() - 1.0).abs() < 1e-12);
    assert!((u.x - 0.6).abs() < 1e-12);
}

// ==================================================================================
// Volume / mass tests
// ==================================================================================

#[test]
fn unit_sphere_volume() {
    assert!((sphere_volume(1.0) - 4.18879).abs() < 1e-4);

    let s = Sphere::new(1.0, Color::BLUE).unwrap();
    assert!((s.volume() - 4.18879).abs() < 1e-4);
}

#[test]
fn mass_scales_linearly_with_density() {
    let light = Sphere::new(1.0, Color::RED).unwrap().with_density(500.0).unwrap();
    let heavy = Sphere::new(1.0, Color::RED).unwrap().with_density(1500.0).unwrap();
    assert!((heavy.mass() - 3.0 * light.mass()).abs() < 1e-9);
    assert!((light.mass() - 500.0 * sphere_volume(1.0)).abs() < 1e-9);
}

#[test]
fn sphere_rejects_bad_radius_and_density() {
    assert_eq!(Sphere::new(0.0, Color::RED), Err(SimError::NonPositiveRadius(0.0)));
    assert_eq!(Sphere::new(-1.0, Color::RED), Err(SimError::NonPositiveRadius(-1.0)));
    assert!(Sphere::new(f64::NAN, Color::RED).is_err());

    let s = Sphere::new(1.0, Color::RED).unwrap();
    assert_eq!(s.with_density(0.0), Err(SimError::NonPositiveDensity(0.0)));
}

// ==================================================================================
// Submerged fraction / regime tests
// ==================================================================================

#[test]
fn fraction_is_clamped_and_linear() {
    // lowest point on the water: nothing under
    assert!(submerged_fraction(0.7, 0.25, 0.45).abs() < 1e-12);
    // center on the water: half under
    assert!((submerged_fraction(0.45, 0.25, 0.45) - 0.5).abs() < 1e-12);
    // well above / well below
    assert_eq!(submerged_fraction(5.0, 0.25, 0.45), 0.0);
    assert_eq!(submerged_fraction(-3.0, 0.25, 0.45), 1.0);
}

#[test]
fn regime_boundaries() {
    let r = 0.25;
    let h_w = 0.45;
    assert_eq!(regime_at(&sphere_anim(0.0, 0.71, 0.0), r, h_w), Regime::Airborne);
    // touching counts as contact
    assert_eq!(regime_at(&sphere_anim(0.0, 0.7, 0.0), r, h_w), Regime::Submerging);
    assert_eq!(regime_at(&sphere_anim(0.0, 0.45, 0.0), r, h_w), Regime::Submerging);
    assert_eq!(regime_at(&sphere_anim(0.0, 0.2, 0.0), r, h_w), Regime::Submerged);
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn water_forces_cancel_for_neutral_body_at_rest() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    assert_eq!(forces.len(), 3);

    let anim = sphere_anim(0.0, -1.0, 0.0);
    let body = water_body(0.25);
    let sample = BodySample {
        anim: &anim,
        volume: body.volume(),
        mass: body.mass(),
        submerged_fraction: 1.0,
    };
    assert_eq!(forces.total(&sample), Vector::zeros());
}

#[test]
fn drag_opposes_velocity() {
    let anim = sphere_anim(0.0, 0.0, 0.0).with_velocity(Vector::new(1.0, -2.0, 0.5));
    let sample = BodySample {
        anim: &anim,
        volume: 1.0,
        mass: 1.0,
        submerged_fraction: 0.5,
    };
    let f = LinearDrag { c_d: 2.0 }.force(&sample);
    assert_eq!(f, Vector::new(-2.0, 4.0, -1.0));
    assert!(f.dot(&anim.vel) < 0.0);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn free_fall_matches_gravity_only() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let body = water_body(0.25);
    let mut anim = sphere_anim(0.0, 100.0, 0.0);

    let n = 100;
    let dt = 0.01;
    for _ in 0..n {
        let regime = buoyant_step(&mut anim, &body, &forces, &p, dt).unwrap();
        assert_eq!(regime, Regime::Airborne);
    }

    let expected = -9.81 * n as f64 * dt;
    assert!((anim.vel.y - expected).abs() < 1e-9, "v.y = {}, expected {}", anim.vel.y, expected);
    assert_eq!(anim.vel.x, 0.0);
    assert_eq!(anim.vel.z, 0.0);
}

#[test]
fn free_fall_is_semi_implicit() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let mut anim = sphere_anim(0.0, 10.0, 0.0);

    buoyant_step(&mut anim, &water_body(0.25), &forces, &p, 0.1).unwrap();

    // position moves with the updated velocity, not the old (zero) one
    assert!((anim.vel.y + 0.981).abs() < 1e-12);
    assert!((anim.pos.y - (10.0 - 0.0981)).abs() < 1e-12);
}

#[test]
fn zero_dt_leaves_state_unchanged() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let body = water_body(0.25);

    // one body per regime, all moving
    for y in [3.0, 0.5, -2.0] {
        let mut anim = sphere_anim(0.1, y, 0.2).with_velocity(Vector::new(0.3, -1.5, 0.0));
        let before = anim.clone();
        buoyant_step(&mut anim, &body, &forces, &p, 0.0).unwrap();
        assert_eq!(anim, before);
    }
}

#[test]
fn negative_dt_is_rejected() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let mut anim = sphere_anim(0.0, 3.0, 0.0);
    let before = anim.clone();

    let err = buoyant_step(&mut anim, &water_body(0.25), &forces, &p, -0.01).unwrap_err();
    assert_eq!(err, SimError::NegativeTimeStep(-0.01));
    assert!(err.is_invalid_argument());
    assert_eq!(anim, before);

    assert!(buoyant_step(&mut anim, &water_body(0.25), &forces, &p, f64::NAN).is_err());
    assert_eq!(anim, before);
}

#[test]
fn non_positive_radius_is_rejected() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let mut anim = sphere_anim(0.0, 3.0, 0.0);

    let err = buoyant_step(&mut anim, &water_body(0.0), &forces, &p, 0.01).unwrap_err();
    assert_eq!(err, SimError::NonPositiveRadius(0.0));
}

#[test]
fn full_submersion_pins_velocity() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let body = water_body(0.25);
    let mut anim = sphere_anim(0.0, 0.0, 0.0).with_velocity(Vector::new(0.0, -1.0, 0.0));

    let regime = buoyant_step(&mut anim, &body, &forces, &p, 0.01).unwrap();
    assert_eq!(regime, Regime::Submerged);
    assert_eq!(anim.vel, Vector::zeros());

    let rest_pos = anim.pos;
    for _ in 0..50 {
        buoyant_step(&mut anim, &body, &forces, &p, 0.01).unwrap();
        assert_eq!(anim.vel, Vector::zeros());
    }
    // neutral buoyancy: nothing moves once pinned
    assert_eq!(anim.pos, rest_pos);
}

#[test]
fn non_neutral_body_drifts_after_rest() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let density = 2.0 * WATER_DENSITY;
    let body = SphereBody { radius: 0.25, density };
    let mut anim = sphere_anim(0.0, 0.0, 0.0);

    let dt = 0.01;
    // a = (rho_w - rho) g / rho, and each pinned step moves by dt * (-dt a)
    let a = (WATER_DENSITY - density) * p.gravity / density;
    let expected = -dt * dt * a;

    for _ in 0..10 {
        let y0 = anim.pos.y;
        let regime = buoyant_step(&mut anim, &body, &forces, &p, dt).unwrap();
        assert_eq!(regime, Regime::Submerged);
        assert_eq!(anim.vel, Vector::zeros());
        let moved = anim.pos.y - y0;
        assert!((moved - expected).abs() < 1e-12, "moved {moved}, expected {expected}");
    }
    assert!((anim.pos.y - 10.0 * expected).abs() < 1e-10);
    assert_eq!(anim.pos.x, 0.0);
    assert_eq!(anim.pos.z, 0.0);
}

#[test]
fn non_positive_density_is_rejected() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let mut anim = sphere_anim(0.0, 3.0, 0.0);
    let before = anim.clone();

    for density in [0.0, -500.0] {
        let body = SphereBody { radius: 0.25, density };
        let err = buoyant_step(&mut anim, &body, &forces, &p, 0.01).unwrap_err();
        assert_eq!(err, SimError::NonPositiveDensity(density));
        assert!(err.is_invalid_argument());
        assert_eq!(anim, before);
    }
}

#[test]
fn contact_step_brakes_sinking_body() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let body = water_body(0.25);
    // half under, sinking
    let mut anim = sphere_anim(0.0, 0.45, 0.0).with_velocity(Vector::new(0.0, -2.0, 0.0));

    let regime = buoyant_step(&mut anim, &body, &forces, &p, 0.01).unwrap();
    assert_eq!(regime, Regime::Submerging);
    assert!(anim.vel.y > -2.0, "expected slower descent, got {}", anim.vel.y);
    assert!(anim.vel.y < 0.0);
}

#[test]
fn non_finite_result_is_rejected() {
    let mut p = test_params();
    p.drag_coefficient = f64::MAX;
    let forces = ForceSet::water(&p);
    let mut anim = sphere_anim(0.0, 0.45, 0.0).with_velocity(Vector::new(0.0, -10.0, 0.0));
    let before = anim.clone();

    let err = buoyant_step(&mut anim, &water_body(0.25), &forces, &p, 0.01).unwrap_err();
    assert!(matches!(err, SimError::NumericAnomaly { .. }));
    assert!(!err.is_invalid_argument());
    assert_eq!(anim, before);
}

// ==================================================================================
// Drop scenario: r = 0.25 from y = 6 into water at 0.45
// ==================================================================================

#[test]
fn drop_into_tank() {
    let p = test_params();
    let forces = ForceSet::water(&p);
    let body = water_body(0.25);
    let mut anim = sphere_anim(-0.5, 6.0, -0.5);

    let mut airborne_steps = 0;
    let mut entry_speed = None;
    let mut last_contact_speed = f64::INFINITY;
    let mut prev_fraction = 0.0;

    for step in 0..700 {
        let (y, vy) = (anim.pos.y, anim.vel.y);
        let fraction = submerged_fraction(y, body.radius, p.water_level);
        assert!(fraction >= prev_fraction, "fraction went back down at step {step}");
        prev_fraction = fraction;

        let regime = buoyant_step(&mut anim, &body, &forces, &p, 0.01).unwrap();
        match regime {
            Regime::Airborne => {
                assert!(entry_speed.is_none(), "left the water at step {step}");
                assert!(anim.pos.y < y);
                assert!(anim.vel.y < vy);
                airborne_steps += 1;
            }
            Regime::Submerging => {
                assert!(y - body.radius <= p.water_level);
                if entry_speed.is_none() {
                    entry_speed = Some(vy.abs());
                }
                // the water slows the fall step after step
                assert!(anim.vel.y.abs() < last_contact_speed);
                last_contact_speed = anim.vel.y.abs();
            }
            Regime::Submerged => {
                assert_eq!(anim.vel, Vector::zeros());
            }
        }
        assert!(anim.pos.is_finite() && anim.vel.is_finite());
    }

    assert!(airborne_steps > 100, "only {airborne_steps} free-fall steps");
    let entry_speed = entry_speed.expect("sphere never reached the water");
    assert!(last_contact_speed < entry_speed);
    assert_eq!(anim.vel, Vector::zeros());
    assert!(anim.pos.y < p.water_level);
}
