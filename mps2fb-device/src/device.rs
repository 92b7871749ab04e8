//! Device context
//!
//! One [`Mps2Fb`] per emulated panel. It owns the register file, the
//! touch table and the framebuffer pipeline, and holds the host
//! collaborators it was realized with.
//!
//! Input events run router, table and notifier back to back inside one
//! call, so a register read after `input_event` returns always sees the
//! whole slot update.

use mps2fb_core::{
    AxisScaler, DeviceConfig, HandlerInfo, InputRouter, InterruptNotifier, RegisterFile,
    TouchPointTable,
};
use mps2fb_display::FramebufferPipeline;
use mps2fb_hal::{Console, GuestRam, InterruptLine, RamAllocator};
use mps2fb_protocol::{ControlFlags, InputEvent, CONTROL_REGION_SIZE};

use crate::error::RealizeError;

/// Name of the control MMIO region
pub const CONTROL_REGION_NAME: &str = "mps2-fb-control";

/// MMIO region exposed on the system bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    /// Name shown in the bus memory map
    pub name: &'a str,
    /// Size in bytes
    pub size: u64,
}

/// MPS2 touch framebuffer device
///
/// - `R`: Framebuffer RAM
/// - `I`: Interrupt output
/// - `C`: Graphic console
pub struct Mps2Fb<R, I, C> {
    config: DeviceConfig,
    regs: RegisterFile,
    touch: TouchPointTable,
    router: InputRouter,
    notifier: InterruptNotifier,
    pipeline: FramebufferPipeline,
    ram: R,
    irq: I,
    console: C,
}

impl<R: GuestRam, I: InterruptLine, C: Console> Mps2Fb<R, I, C> {
    /// Realize a device
    ///
    /// Validates `config`, allocates the framebuffer RAM and sizes the
    /// console. The first display tick maps memory before drawing.
    pub fn realize<A>(
        config: DeviceConfig,
        allocator: &mut A,
        irq: I,
        mut console: C,
    ) -> Result<Self, RealizeError>
    where
        A: RamAllocator<Ram = R>,
    {
        config.validate()?;
        let size = config.framebuffer_size()?;
        let ram = allocator.alloc_ram(config.name.as_str(), size)?;

        console.resize(config.cols, config.rows);

        log::info!(
            "{}: {}x{} {}, {} bytes of framebuffer",
            config.name.as_str(),
            config.cols,
            config.rows,
            config.format.name(),
            size
        );

        Ok(Self {
            regs: RegisterFile::new(),
            touch: TouchPointTable::new(AxisScaler::new(config.cols, config.rows)),
            router: InputRouter::new(),
            notifier: InterruptNotifier::new(),
            pipeline: FramebufferPipeline::new(config.cols, config.rows, config.format),
            config,
            ram,
            irq,
            console,
        })
    }

    /// Return to power-on state
    ///
    /// Releases every slot, clears the mask and control word and forces a
    /// remap on the next tick. Framebuffer contents are kept.
    pub fn reset(&mut self) {
        self.touch.reset();
        self.regs.reset();
        self.pipeline.invalidate();
        log::debug!("{}: reset", self.config.name.as_str());
    }

    /// Guest read from the control region
    pub fn mmio_read(&self, offset: u64, size: u32) -> u32 {
        self.regs.read(&self.touch, offset, size)
    }

    /// Guest write to the control region
    pub fn mmio_write(&mut self, offset: u64, size: u32, value: u32) {
        self.regs.write(offset, size, value);
    }

    /// Host input event
    ///
    /// Returns true if the touch state changed. Each change pulses the
    /// interrupt once when the guest has enabled it.
    pub fn input_event(&mut self, event: &InputEvent) -> bool {
        let changed = self.router.route(&mut self.touch, event);
        self.notifier
            .notify(changed, self.regs.control(), &mut self.irq);
        changed
    }

    /// Host multi-touch sample in wire encoding
    pub fn multitouch_wire_event(
        &mut self,
        phase: u8,
        slot: i64,
        tracking_id: i64,
        axis: u8,
        value: i64,
    ) -> bool {
        let changed =
            self.router
                .route_wire_multitouch(&mut self.touch, phase, slot, tracking_id, axis, value);
        self.notifier
            .notify(changed, self.regs.control(), &mut self.irq);
        changed
    }

    /// Input handler registration details
    pub fn handler_info(&self) -> HandlerInfo {
        self.router.handler_info()
    }

    /// Console requested a full refresh
    pub fn invalidate(&mut self) {
        self.pipeline.invalidate();
    }

    /// Display tick
    ///
    /// Returns the number of rows drawn.
    pub fn update(&mut self) -> u32 {
        self.pipeline.tick(self.ram.as_bytes(), &mut self.console)
    }

    /// MMIO regions, control first
    pub fn regions(&self) -> [Region<'_>; 2] {
        [
            Region {
                name: CONTROL_REGION_NAME,
                size: CONTROL_REGION_SIZE,
            },
            Region {
                name: self.config.name.as_str(),
                size: self.ram.len() as u64,
            },
        ]
    }

    /// Configuration the device was realized with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Touch slots and mask
    pub fn touch(&self) -> &TouchPointTable {
        &self.touch
    }

    /// Current control flags
    pub fn control(&self) -> ControlFlags {
        self.regs.control()
    }

    /// Framebuffer pipeline state
    pub fn framebuffer(&self) -> &FramebufferPipeline {
        &self.pipeline
    }

    /// Framebuffer RAM
    pub fn ram(&self) -> &[u8] {
        self.ram.as_bytes()
    }

    /// Framebuffer RAM, for guest stores
    pub fn ram_mut(&mut self) -> &mut [u8] {
        self.ram.as_bytes_mut()
    }

    /// Interrupt output
    pub fn irq(&self) -> &I {
        &self.irq
    }

    /// Graphic console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable graphic console
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Interrupt pulses emitted
    pub fn irq_pulses(&self) -> u32 {
        self.notifier.pulses()
    }

    /// Touch changes seen with interrupts disabled
    pub fn irq_suppressed(&self) -> u32 {
        self.notifier.suppressed()
    }

    /// Host events the router did not consume
    pub fn dropped_events(&self) -> u32 {
        self.router.dropped()
    }
}
