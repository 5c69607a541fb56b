use glam::Mat4;

use super::common::{align_up, mat4_binding_size, MAT4_SIZE};
use super::RenderCtx;

/// Uniform buffer holding one MVP matrix per draw call of a frame.
///
/// Matrices live in slots aligned to the device's dynamic-offset alignment,
/// so every draw binds the same bind group with its own offset. All writes
/// land before the frame is submitted, which a single shared matrix could not
/// survive with more than one draw.
pub(super) struct MatrixUniformRing {
    label: &'static str,
    layout: wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MatrixUniformRing {
    const MIN_SLOTS: usize = 4;

    pub(super) fn new(ctx: &RenderCtx<'_>, label: &'static str, visibility: wgpu::ShaderStages) -> Self {
        let layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(mat4_binding_size()),
                    },
                    count: None,
                }],
            });

        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_up(MAT4_SIZE, align.max(1));

        let (buffer, bind_group) = Self::allocate(ctx, label, &layout, stride, Self::MIN_SLOTS);

        Self {
            label,
            layout,
            stride,
            capacity: Self::MIN_SLOTS,
            buffer,
            bind_group,
        }
    }

    pub(super) fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub(super) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Dynamic offset of slot `index`.
    pub(super) fn offset(&self, index: usize) -> u32 {
        slot_offset(self.stride, index)
    }

    /// Uploads `matrices` into consecutive slots, growing the buffer if needed.
    pub(super) fn write(&mut self, ctx: &RenderCtx<'_>, matrices: &[Mat4]) {
        if let Some(capacity) = slots_for(matrices.len(), self.capacity) {
            let (buffer, bind_group) = Self::allocate(ctx, self.label, &self.layout, self.stride, capacity);
            log::debug!("{}: grew uniform ring to {capacity} slots", self.label);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }

        for (i, m) in matrices.iter().enumerate() {
            ctx.queue.write_buffer(
                &self.buffer,
                slot_offset(self.stride, i) as u64,
                bytemuck::cast_slice(&m.to_cols_array()),
            );
        }
    }

    fn allocate(
        ctx: &RenderCtx<'_>,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: Some(mat4_binding_size()),
                }),
            }],
        });

        (buffer, bind_group)
    }
}

/// New slot count when `len` matrices do not fit in `capacity`, else `None`.
fn slots_for(len: usize, capacity: usize) -> Option<usize> {
    (len > capacity).then(|| len.next_power_of_two())
}

/// Byte offset of slot `index`.
fn slot_offset(stride: u64, index: usize) -> u32 {
    (index as u64 * stride) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_draws_keep_capacity() {
        assert_eq!(slots_for(0, 4), None);
        assert_eq!(slots_for(4, 4), None);
    }

    #[test]
    fn overflow_grows_to_next_power_of_two() {
        assert_eq!(slots_for(5, 4), Some(8));
        assert_eq!(slots_for(9, 8), Some(16));
        assert_eq!(slots_for(16, 8), Some(16));
    }

    #[test]
    fn slots_are_stride_apart() {
        assert_eq!(slot_offset(256, 0), 0);
        assert_eq!(slot_offset(256, 1), 256);
        assert_eq!(slot_offset(256, 3), 768);
    }
}
