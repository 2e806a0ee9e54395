//! Procedural grids, split into primitives according to a [Mode].

use nalgebra::Vector3;
use polymesh::{AttributeKind, HybridLayout, Mesh, MeshError, Mode, VertexBuffer};

/// A flat grid of `quads * quads` unit squares on the XY plane.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub quads: u32,
    pub scale: Vector3<f32>,
}

impl Grid {
    #[inline]
    fn side(&self) -> u32 {
        self.quads + 1
    }

    #[inline]
    fn vertex(&self, row: u32, col: u32) -> u32 {
        row * self.side() + col
    }

    pub fn vertex_count(&self) -> u32 {
        self.side() * self.side()
    }

    fn positions(&self) -> Vec<f32> {
        let side = self.side();
        (0..side)
            .flat_map(|row| (0..side).map(move |col| (row, col)))
            .flat_map(|(row, col)| {
                [
                    col as f32 * self.scale.x,
                    row as f32 * self.scale.y,
                    0.0,
                ]
            })
            .collect()
    }

    fn texcoords(&self) -> Vec<f32> {
        let side = self.side();
        let q = self.quads as f32;
        (0..side)
            .flat_map(|row| (0..side).flat_map(move |col| [col as f32 / q, row as f32 / q]))
            .collect()
    }

    fn colors(&self) -> Vec<u8> {
        let side = self.side();
        let q = self.quads;
        (0..side)
            .flat_map(|row| {
                (0..side).flat_map(move |col| {
                    [(col * 255 / q) as u8, (row * 255 / q) as u8, 0, 255]
                })
            })
            .collect()
    }

    /// Corners of quad `(row, col)`, counter-clockwise from its minimum corner.
    fn quad(&self, row: u32, col: u32, step: u32) -> [u32; 4] {
        [
            self.vertex(row, col),
            self.vertex(row, col + step),
            self.vertex(row + step, col + step),
            self.vertex(row + step, col),
        ]
    }

    /// Triangle list over quads `step` units wide; `step` must divide `quads`.
    fn triangles(&self, rows: std::ops::Range<u32>, step: u32) -> Vec<u32> {
        let mut out = Vec::new();
        for row in rows.step_by(step as usize) {
            for col in (0..self.quads).step_by(step as usize) {
                let [a, b, c, d] = self.quad(row, col, step);
                out.extend([a, b, c, a, c, d]);
            }
        }
        out
    }

    /// Strip across row `row` of quads.
    fn strip(&self, row: u32) -> Vec<u32> {
        (0..self.side())
            .flat_map(|col| [self.vertex(row + 1, col), self.vertex(row, col)])
            .collect()
    }

    /// Fan pivoting on the origin, sweeping the two far edges of the grid.
    fn fan(&self) -> Vec<u32> {
        let q = self.quads;
        std::iter::once(self.vertex(0, 0))
            .chain((0..=q).map(|row| self.vertex(row, q)))
            .chain((0..q).rev().map(|col| self.vertex(q, col)))
            .collect()
    }

    /// Vertices around the outside of the grid, counter-clockwise.
    fn perimeter(&self) -> Vec<u32> {
        let q = self.quads;
        (0..q)
            .map(|col| self.vertex(0, col))
            .chain((0..q).map(|row| self.vertex(row, q)))
            .chain((1..=q).rev().map(|col| self.vertex(q, col)))
            .chain((1..=q).rev().map(|row| self.vertex(row, 0)))
            .collect()
    }

    /// Row-major snake through every vertex.
    fn snake(&self) -> Vec<u32> {
        (0..self.side())
            .flat_map(|row| {
                let cols: Box<dyn Iterator<Item = u32>> = if row % 2 == 0 {
                    Box::new(0..self.side())
                } else {
                    Box::new((0..self.side()).rev())
                };
                cols.map(move |col| self.vertex(row, col))
            })
            .collect()
    }

    fn horizontal_lines(&self) -> Vec<u32> {
        (0..self.side())
            .flat_map(|row| {
                (0..self.quads).flat_map(move |col| [self.vertex(row, col), self.vertex(row, col + 1)])
            })
            .collect()
    }

    /// Index stream of the grid as primitives of `mode`, and the hybrid layout if needed.
    fn indices(&self, mode: Mode) -> (Option<Vec<u32>>, Option<HybridLayout>) {
        let all = 0..self.quads;
        match mode {
            Mode::Points => (None, None),
            Mode::Lines => (Some(self.horizontal_lines()), None),
            Mode::LineStrip => (Some(self.snake()), None),
            Mode::LineLoop => (Some(self.perimeter()), None),
            Mode::Triangles => (Some(self.triangles(all, 1)), None),
            Mode::TriangleStrip => (Some(self.strip(0)), None),
            Mode::TriangleFan => (Some(self.fan()), None),
            Mode::Patch(n) if n.get() == 3 => (Some(self.triangles(all, 1)), None),
            Mode::Patch(n) if n.get() == 4 => {
                let quads = all
                    .flat_map(|row| (0..self.quads).flat_map(move |col| self.quad(row, col, 1)))
                    .collect();
                (Some(quads), None)
            }
            Mode::Patch(_) => (None, None),
            Mode::Hybrid => {
                let list = self.triangles(0..1, 1);
                let strips = (1..self.quads).map(|row| self.strip(row)).collect::<Vec<_>>();
                let fan = self.fan();

                let mut lengths = vec![list.len() as u32];
                lengths.extend(strips.iter().map(|s| s.len() as u32));
                lengths.push(fan.len() as u32);
                let strip_start = 1;
                let fan_start = strip_start + strips.len();

                let mut stream = list;
                stream.extend(strips.into_iter().flatten());
                stream.extend(fan);
                (
                    Some(stream),
                    HybridLayout::new([strip_start, fan_start], lengths).ok(),
                )
            }
        }
    }

    /// Coarser triangle lists, halving the resolution at each level.
    fn lod_levels(&self, count: usize) -> Vec<Vec<u32>> {
        (0..count)
            .map(|l| 1u32 << l)
            .take_while(|&step| step <= self.quads && self.quads % step == 0)
            .map(|step| self.triangles(0..self.quads, step))
            .collect()
    }

    /// Build a mesh of this grid.
    ///
    /// LOD levels are only generated for [Triangles](Mode::Triangles).
    pub fn build(&self, mode: Mode, lod_levels: usize) -> Result<Mesh, MeshError> {
        let mut mesh = Mesh::with_mode(mode);
        mesh.set_buffer(AttributeKind::Position, 3, self.positions())?;
        mesh.set_buffer(
            AttributeKind::Normal,
            3,
            [0.0f32, 0.0, 1.0].repeat(self.vertex_count() as usize),
        )?;
        mesh.set_buffer(AttributeKind::Color, 4, self.colors())?;
        if let Some(uv0) = AttributeKind::texcoord(0) {
            mesh.set_buffer(uv0, 2, self.texcoords())?;
        }

        let (indices, layout) = self.indices(mode);
        if let Some(indices) = indices {
            mesh.set_buffer(AttributeKind::Index, 1, indices)?;
        }
        mesh.set_hybrid_layout(layout);

        if mode == Mode::Triangles {
            let levels = self
                .lod_levels(lod_levels)
                .into_iter()
                .map(|l| VertexBuffer::new(AttributeKind::Index, 1, l))
                .collect::<Result<Vec<_>, _>>()?;
            mesh.set_lod_levels(levels)?;
        }

        tracing::debug!(
            quads = self.quads,
            ?mode,
            buffers = mesh.buffer_list().len(),
            lod_levels = mesh.num_lod_levels(),
            "built grid mesh"
        );
        Ok(mesh)
    }
}
