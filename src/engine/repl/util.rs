use crate::engine::ecs::{self, BodyId};

use super::color;

/// Format a single body as an `ls`-style summary line, indented by its depth in the tree.
///
/// Returns `None` if the body no longer exists.
pub fn format_ls_line(
    world: &ecs::World,
    index: usize,
    id: BodyId,
    focused: bool,
) -> Option<String> {
    let body = world.get(id)?;

    let mut depth = 0;
    let mut cur = body.parent;
    while let Some(p) = cur {
        depth += 1;
        cur = world.parent_of(p);
    }

    let rgb = color::rgb_from_hex(body.color);
    let kind_rgb = color::scale_rgb(rgb, 0.6);
    let marker = if focused { "*" } else { " " };

    Some(format!(
        "🪐 {marker}{index:>2}: {indent}{name}  {kind}  r={r:.1} θ={theta:.3}",
        indent = "  ".repeat(depth),
        name = color::paint_fg(&body.name, rgb),
        kind = color::paint_fg(body.kind.name(), kind_rgb),
        r = body.orbital_radius,
        theta = body.orbital_angle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ecs::{BodyKind, CelestialBody};

    #[test]
    fn moons_are_indented_under_planets() {
        let mut world = ecs::World::new();
        let earth = world
            .add_body(CelestialBody::new("Earth", BodyKind::Planet).with_orbit(30.0, 0.01))
            .unwrap();
        let moon = world
            .add_child(earth, CelestialBody::new("Moon", BodyKind::Moon).with_orbit(4.0, 0.05))
            .unwrap();

        let planet_line = format_ls_line(&world, 0, earth, true).unwrap();
        let moon_line = format_ls_line(&world, 1, moon, false).unwrap();

        assert!(planet_line.contains("* 0: "));
        assert!(planet_line.contains("Earth") && planet_line.contains("planet"));
        assert!(moon_line.contains(" 1:   "));
        assert!(moon_line.contains("r=4.0"));
    }
}
