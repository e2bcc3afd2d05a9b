//! Debug overlay drawn through the host's draw calls.
use agent_core::{DebugColor, WorldInterface, keys};

use crate::AgentContext;

const MARKER_RADIUS: f32 = 0.5;
const DIRECTION_LENGTH: f32 = 5.0;

pub(crate) fn render<W: WorldInterface>(ctx: &mut AgentContext<W>) {
    let AgentContext { world, model, .. } = ctx;

    let grid = model.grid();
    let half_cell = grid.cell_size() * 0.5;
    for cell in grid.cells() {
        if cell.visited {
            world.draw_circle(cell.position, MARKER_RADIUS, DebugColor::Gray);
        } else {
            world.draw_circle(cell.position, half_cell * cell.influence.max(0.05), DebugColor::Green);
        }
    }

    for (_, house) in model.houses() {
        for point in &house.search_points {
            let color = if point.visited { DebugColor::Gray } else { DebugColor::Blue };
            world.draw_circle(point.position, MARKER_RADIUS, color);
        }
        if house.has_door() {
            world.draw_segment(house.center, house.door_location, DebugColor::Yellow);
        }
    }

    for (_, zone) in model.zones() {
        world.draw_circle(zone.center, zone.radius, DebugColor::Red);
    }

    if let Some(target) = ctx.read(keys::TARGET) {
        ctx.world.draw_circle(target, MARKER_RADIUS * 2.0, DebugColor::Yellow);
    }
    if let Some(agent) = ctx.agent() {
        ctx.world
            .draw_direction(agent.position, agent.linear_velocity, DIRECTION_LENGTH, DebugColor::Green);
        ctx.world
            .draw_direction(agent.position, agent.heading(), DIRECTION_LENGTH, DebugColor::Blue);
    }
}
