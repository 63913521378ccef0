use glam::Vec2;

/// Immediate-mode drawing target for one frame
pub trait Canvas {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// Records draw calls so they can be replayed by the renderer
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands while keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Circles still visible after the last clear
    pub fn visible_circles(&self) -> impl Iterator<Item = (Vec2, f32, [f32; 4])> + '_ {
        let start = self
            .commands
            .iter()
            .rposition(|command| matches!(command, DrawCommand::Clear))
            .map_or(0, |i| i + 1);

        self.commands[start..].iter().filter_map(|command| match *command {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::Clear => None,
        })
    }
}

impl Canvas for DrawList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}
