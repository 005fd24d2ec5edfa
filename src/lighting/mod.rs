mod point;

use crate::{
    material::Color,
    math::Vector4,
    object::Shape,
};

pub use point::*;

/// Phong shading of one light at a surface point.
///
/// `shade` is the fraction of the light that reaches the point (0 when fully
/// occluded). Ambient light is applied regardless; diffuse and specular
/// contributions are scaled by `shade` and only appear when the light is on
/// the visible side of the surface.
pub fn lighting(
    object: &Shape,
    light: &PointLight,
    point: Vector4,
    eye: Vector4,
    normal: Vector4,
    shade: f64,
) -> Color {
    let material = object.material();
    let surface = material.pattern.color_at(object.uv_mapping(point));
    let effective = surface * light.intensity;
    let ambient = effective * material.ambient;

    if shade <= 0. {
        return ambient;
    }

    let lightv = (light.position - point).normalize();
    let light_dot_normal = lightv.dot(normal);
    if light_dot_normal < 0. {
        return ambient;
    }

    let diffuse = effective * (material.diffuse * light_dot_normal);

    // highlight from the light bounced toward the eye
    let reflect_dot_eye = (-lightv).reflect(normal).dot(eye);
    let specular = if reflect_dot_eye <= 0. {
        Color::black()
    } else {
        light.intensity * (material.specular * reflect_dot_eye.powf(material.shininess))
    };

    ambient + (diffuse + specular) * shade
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::material::{Material, Pattern};

    fn front_light(position: Vector4) -> PointLight {
        PointLight::new(position, Color::white())
    }

    #[test]
    fn eye_between_light_and_surface() {
        let s = Shape::sphere();
        let p = Vector4::point(0., 0., -1.);
        let c = lighting(
            &s,
            &front_light(Vector4::point(0., 0., -10.)),
            p,
            Vector4::vector(0., 0., -1.),
            Vector4::vector(0., 0., -1.),
            1.,
        );
        assert_abs_diff_eq!(c, Color::new(1.9, 1.9, 1.9), epsilon = 1e-9);
    }

    #[test]
    fn eye_offset_45_degrees() {
        let s = Shape::sphere();
        let k = 2f64.sqrt() / 2.;
        let c = lighting(
            &s,
            &front_light(Vector4::point(0., 0., -10.)),
            Vector4::point(0., 0., -1.),
            Vector4::vector(0., k, -k),
            Vector4::vector(0., 0., -1.),
            1.,
        );
        assert_abs_diff_eq!(c, Color::new(1.0, 1.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn eye_in_path_of_reflection() {
        let s = Shape::sphere();
        let k = 2f64.sqrt() / 2.;
        let c = lighting(
            &s,
            &front_light(Vector4::point(0., 10., -10.)),
            Vector4::point(0., 0., -1.),
            Vector4::vector(0., -k, -k),
            Vector4::vector(0., 0., -1.),
            1.,
        );
        assert_abs_diff_eq!(c, Color::new(1.6364, 1.6364, 1.6364), epsilon = 1e-4);
    }

    #[test]
    fn light_behind_surface_leaves_ambient() {
        let s = Shape::sphere();
        let c = lighting(
            &s,
            &front_light(Vector4::point(0., 0., 10.)),
            Vector4::point(0., 0., -1.),
            Vector4::vector(0., 0., -1.),
            Vector4::vector(0., 0., -1.),
            1.,
        );
        assert_abs_diff_eq!(c, Color::new(0.1, 0.1, 0.1), epsilon = 1e-9);
    }

    #[test]
    fn shade_factor_scales_diffuse_and_specular() {
        let s = Shape::sphere();
        let light = front_light(Vector4::point(0., 0., -10.));
        let eye = Vector4::vector(0., 0., -1.);
        let p = Vector4::point(0., 0., -1.);

        let blocked = lighting(&s, &light, p, eye, eye, 0.);
        assert_abs_diff_eq!(blocked, Color::new(0.1, 0.1, 0.1), epsilon = 1e-9);

        let half = lighting(&s, &light, p, eye, eye, 0.5);
        assert_abs_diff_eq!(half, Color::new(1.0, 1.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn pattern_is_sampled_at_mapped_point() {
        let stripes = Pattern::stripe(Color::white().into(), Color::black().into());
        let s = Shape::plane().with_material(Material {
            pattern: stripes,
            ambient: 1.,
            diffuse: 0.,
            specular: 0.,
            ..Default::default()
        });
        let light = front_light(Vector4::point(0., 10., -10.));
        let eye = Vector4::vector(0., 1., 0.);
        let n = Vector4::up();

        let c1 = lighting(&s, &light, Vector4::point(0.9, 0., 0.), eye, n, 1.);
        let c2 = lighting(&s, &light, Vector4::point(1.1, 0., 0.), eye, n, 1.);
        assert_eq!(c1, Color::white());
        assert_eq!(c2, Color::black());
    }
}
