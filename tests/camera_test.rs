use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use std::time::Duration;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Rad};
use folio_ngin::{
    camera::{CameraConfig, OrbitCamera},
    pipelines::light::{Light, LightUniform, MAX_LIGHTS},
    scene::SceneConfig,
};

#[test]
fn should_start_at_the_configured_eye() {
    let config = CameraConfig::default();
    let orbit = OrbitCamera::new(&config);
    assert!((orbit.radius() - 148.0_f32.sqrt()).abs() < 1e-5);
    assert!((orbit.eye() - config.eye).magnitude() < 1e-4);
    assert!((orbit.rate() - TAU / 60.0 * 0.3).abs() < 1e-7);
}

#[test]
fn should_clamp_the_polar_angle() {
    let mut orbit = OrbitCamera::new(&CameraConfig::default());
    orbit.set_polar(Rad(0.1));
    assert_eq!(orbit.polar(), Rad(FRAC_PI_4));
    orbit.set_polar(Rad(3.0));
    assert_eq!(orbit.polar(), Rad(FRAC_PI_2));

    let overhead = CameraConfig {
        eye: Point3::new(0.0, 10.0, 0.001),
        ..Default::default()
    };
    assert_eq!(OrbitCamera::new(&overhead).polar(), Rad(FRAC_PI_4));
}

#[test]
fn should_auto_rotate_at_a_constant_rate() {
    let mut orbit = OrbitCamera::new(&CameraConfig::default());
    let start = orbit.azimuth().0;

    orbit.update(Duration::from_secs(10));
    let expected = (start - orbit.rate() * 10.0).rem_euclid(TAU);
    assert_eq!(orbit.azimuth().0, expected);
    assert!((0.0..TAU).contains(&orbit.azimuth().0));

    // the radius and the height never change while orbiting
    let eye = orbit.eye();
    assert!((eye.to_vec().magnitude() - orbit.radius()).abs() < 1e-4);
    assert!((eye.y - 2.0).abs() < 1e-4);

    // one full revolution every 200 s at speed 0.3
    orbit.update(Duration::from_secs(200));
    let turned = (orbit.azimuth().0 - start).abs();
    assert!(turned < 1e-3 || (TAU - turned) < 1e-3, "{turned}");
}

#[test]
fn should_pack_the_scene_lights() {
    let config = SceneConfig::default();
    let uniform = LightUniform::from_lights(&config.lights);
    assert_eq!(uniform.count(), 4);
    assert!((uniform.ambient_intensity() - 0.15).abs() < 1e-6);
}

#[test]
fn should_drop_lights_beyond_the_limit() {
    let lights: Vec<_> = (0..6)
        .map(|i| Light::Point {
            position: [i as f32, 0.0, 0.0].into(),
            colour: 0xffffff,
            intensity: 1.0,
        })
        .collect();
    let uniform = LightUniform::from_lights(&lights);
    assert_eq!(uniform.count(), MAX_LIGHTS);
    assert_eq!(LightUniform::from_lights(&[]).count(), 0);
}
