//! embedded-graphics integration
//!
//! The panel receives pixels over the DSI video stream, not through this
//! driver, so only the geometry is exposed: layout code can size itself from
//! the panel the same way it would from any other
//! [`OriginDimensions`](embedded_graphics_core::geometry::OriginDimensions)
//! display.

use embedded_graphics_core::geometry::{OriginDimensions, Size};

use crate::mode::DEFAULT_MODE;
use crate::panel::Ili9806e;

impl<DSI, RST, PWR, BL> OriginDimensions for Ili9806e<DSI, RST, PWR, BL> {
    fn size(&self) -> Size {
        Size::new(
            u32::from(DEFAULT_MODE.hdisplay),
            u32::from(DEFAULT_MODE.vdisplay),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::DsiTransport;
    use crate::power::NoBacklight;
    use core::convert::Infallible;

    struct NullDsi;

    impl DsiTransport for NullDsi {
        type Error = Infallible;

        fn write_buffer(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn size_is_active_area() {
        let panel = Ili9806e::new(NullDsi, (), NoBacklight);
        assert_eq!(panel.size(), Size::new(480, 854));
    }
}
