use std::f64::consts::PI;

use anyhow::Context;
use clap::{value_t, App, Arg, ArgMatches};
use log::info;

use lumen::{
    camera::Camera,
    lighting::PointLight,
    material::{Color, Material, Pattern},
    math::{Matrix, Vector4},
    obj,
    object::Shape,
    render::{render, RenderConfig},
    world::World,
};

/// The demo room: six checkered walls around a sphere, a mirrored cylinder,
/// a glass cube and a striped cone.
fn demo_room() -> lumen::Result<World> {
    let mut world = World::default();

    let walls = Material {
        pattern: Pattern::checker(
            Color::new(0.05, 0.05, 0.05).into(),
            Color::new(0.95, 0.95, 0.95).into(),
        ),
        specular: 0.,
        ..Default::default()
    };
    let wall_transforms = [
        Matrix::identity(),
        Matrix::translation(0., 10., 0.) * Matrix::rotation_x(PI),
        Matrix::translation(0., 0., 5.) * Matrix::rotation_x(PI / 2.),
        Matrix::translation(0., 0., -5.) * Matrix::rotation_x(-PI / 2.),
        Matrix::translation(-5., 0., 0.) * Matrix::rotation_z(-PI / 2.),
        Matrix::translation(5., 0., 0.) * Matrix::rotation_z(PI / 2.),
    ];
    for m in wall_transforms.iter() {
        world.add_object(
            Shape::plane()
                .with_transform(*m)?
                .with_material(walls.clone()),
        );
    }

    let grad_stripe = Pattern::stripe(
        Pattern::gradient(Color::new(0.1, 1., 0.1).into(), Color::new(0.9, 0.1, 0.1).into()),
        Pattern::gradient(Color::new(0.9, 0.1, 0.1).into(), Color::new(0.1, 1., 0.1).into()),
    )
    .with_transform(Matrix::scaling(0.125, 0.125, 0.125))?;
    world.add_object(
        Shape::sphere()
            .with_transform(Matrix::translation(-0.5, 1., 1.))?
            .with_material(Material {
                pattern: grad_stripe,
                diffuse: 0.7,
                specular: 0.3,
                shininess: 20.,
                ..Default::default()
            }),
    );

    world.add_object(
        Shape::cylinder(true)
            .with_transform(
                Matrix::translation(1.25, 0.25, 0.)
                    * Matrix::rotation_y(PI / 4.)
                    * Matrix::rotation_x(PI / 2.)
                    * Matrix::scaling(0.25, 2., 0.25),
            )?
            .with_material(Material {
                pattern: Color::new(0.1, 0.1, 0.9).into(),
                diffuse: 0.7,
                specular: 0.3,
                reflective: 1.,
                ..Default::default()
            }),
    );

    world.add_object(
        Shape::cube()
            .with_transform(
                Matrix::translation(-1., 0.501, -0.75)
                    * Matrix::rotation_y(PI / 6.)
                    * Matrix::scaling(0.5, 0.5, 0.5),
            )?
            .with_material(Material {
                pattern: Color::new(0.05, 0.05, 0.05).into(),
                diffuse: 0.7,
                specular: 0.7,
                reflective: 0.1,
                transparency: 0.9,
                refractive_index: 1.52,
                ..Default::default()
            }),
    );

    let stripe = Pattern::stripe(
        Color::new(0.9, 0., 0.9).into(),
        Color::new(0.05, 0.05, 0.05).into(),
    )
    .with_transform(Matrix::scaling(0.0625, 1., 1.))?;
    world.add_object(
        Shape::cone(false)
            .with_transform(Matrix::translation(0.5, 1., -0.5) * Matrix::scaling(0.5, 1., 0.5))?
            .with_material(Material {
                pattern: stripe,
                diffuse: 0.7,
                specular: 0.5,
                reflective: 0.1,
                ..Default::default()
            }),
    );

    world.add_light(PointLight::new(Vector4::point(-4.5, 4.5, -4.5), Color::white()));

    Ok(world)
}

fn cli() -> App<'static, 'static> {
    App::new("lumen")
        .version("0.1.0")
        .about("Renders a demo room with a recursive Whitted-style ray tracer")
        .arg(
            Arg::with_name("width")
                .long("width")
                .help("Width of the rendered image")
                .default_value("480"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .help("Height of the rendered image")
                .default_value("270"),
        )
        .arg(
            Arg::with_name("fov")
                .long("fov")
                .help("Field of view, in radians")
                .default_value("1.0471975511965976"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("t")
                .help("Number of render threads [default: number of CPUs]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("depth")
                .long("depth")
                .help("Maximum number of bounces per ray")
                .default_value("5"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .help("The output file")
                .default_value("render.png"),
        )
        .arg(
            Arg::with_name("obj")
                .long("obj")
                .help("An OBJ model to place in the room")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("smooth")
                .long("smooth")
                .help("Interpolate vertex normals of the OBJ model"),
        )
}

/// Image size, field of view and render settings from the parsed flags.
fn settings(matches: &ArgMatches) -> anyhow::Result<(u32, u32, f64, RenderConfig)> {
    let width: u32 = value_t!(matches, "width", u32)?;
    let height: u32 = value_t!(matches, "height", u32)?;
    let fov: f64 = value_t!(matches, "fov", f64)?;
    let max_depth: u32 = value_t!(matches, "depth", u32)?;
    let mut config = RenderConfig {
        max_depth,
        ..Default::default()
    };
    if matches.is_present("threads") {
        config.threads = value_t!(matches, "threads", usize)?;
    }
    Ok((width, height, fov, config))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let (width, height, fov, config) = settings(&matches)?;

    let mut world = demo_room()?;
    if let Some(path) = matches.value_of("obj") {
        let model = obj::load_obj(path, matches.is_present("smooth"), &Material::default())
            .with_context(|| format!("failed to load {}", path))?;
        world.add_object(Shape::from(model).with_transform(Matrix::translation(0., 0., 2.5))?);
    }
    info!("Scene constructed with {} object(s)", world.objects.len());

    let camera = Camera::new(width, height, fov).look_at(
        Vector4::point(0., 1.5, -4.5),
        Vector4::point(0., 1., 0.),
        Vector4::up(),
    )?;

    let canvas = render(&world, &camera, &config)?;

    let output = matches.value_of("output").unwrap_or("render.png");
    canvas
        .save_png(output)
        .with_context(|| format!("failed to write {}", output))?;
    info!("Wrote {}", output);

    Ok(())
}
