//! Simulated SPI flash contents of a first-party Pro Controller.
//!
//! The host reads a handful of regions during bring-up (serial number,
//! colours, factory calibration). Those regions are served from the static
//! table below; every other address reads back as erased flash (`0xFF`).
//! Writes and erases are acknowledged but never stored.
//!
//! ```text
//! 0x6000  serial number (blank)
//! 0x6020  6-axis motion sensor factory calibration
//! 0x603D  left stick factory calibration (runs into the colour block)
//! 0x6050  body / button / grip colours
//! 0x6080  factory sensor and stick device parameters
//! 0x6098  stick device parameters 2
//! 0x8010  user stick calibration (blank)
//! ```

#![deny(static_mut_refs)]

/// Largest SPI read payload that fits a sub-command reply frame.
pub const SPI_READ_MAX: usize = 0x1D;
/// Value of unprogrammed flash.
pub const ERASED: u8 = 0xFF;

/// Address of the controller body colour triple.
pub const COLOR_ADDRESS: u32 = 0x6050;

/// A contiguous run of programmed flash bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashRegion {
    pub address: u32,
    pub data: &'static [u8],
}

impl FlashRegion {
    pub fn end(&self) -> u32 {
        let len = u32::try_from(self.data.len()).unwrap_or(u32::MAX);
        self.address.saturating_add(len)
    }
}

pub const SERIAL_NUMBER: FlashRegion = FlashRegion {
    address: 0x6000,
    data: &[ERASED; 16],
};

pub const IMU_FACTORY_CALIBRATION: FlashRegion = FlashRegion {
    address: 0x6020,
    data: &[
        0x64, 0xFF, 0x33, 0x00, 0xB8, 0x01, 0x00, 0x40, 0x00, 0x40, 0x00, 0x40, 0x17, 0x00, 0xD7,
        0xFF, 0xBD, 0xFF, 0x3B, 0x34, 0x3B, 0x34, 0x3B, 0x34,
    ],
};

pub const LEFT_STICK_FACTORY_CALIBRATION: FlashRegion = FlashRegion {
    address: 0x603D,
    data: &[
        0xE6, 0xA5, 0x67, 0x1A, 0x58, 0x78, 0x50, 0x56, 0x60, 0x1A, 0xF8, 0x7F, 0x20, 0xC6, 0x63,
        0xD5, 0x15, 0x5E, 0xFF, 0x32, 0x32, 0x32, 0xFF, 0xFF, 0xFF,
    ],
};

pub const BODY_COLORS: FlashRegion = FlashRegion {
    address: COLOR_ADDRESS,
    data: &[
        0x32, 0x32, 0x32, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ],
};

pub const FACTORY_STICK_PARAMETERS: FlashRegion = FlashRegion {
    address: 0x6080,
    data: &[
        0x50, 0xFD, 0x00, 0x00, 0xC6, 0x0F, 0x0F, 0x30, 0x61, 0xAE, 0x90, 0xD9, 0xD4, 0x14, 0x54,
        0x41, 0x15, 0x54, 0xC7, 0x79, 0x9C, 0x33, 0x36, 0x63,
    ],
};

pub const STICK_PARAMETERS_2: FlashRegion = FlashRegion {
    address: 0x6098,
    data: &[
        0x0F, 0x30, 0x61, 0xAE, 0x90, 0xD9, 0xD4, 0x14, 0x54, 0x41, 0x15, 0x54, 0xC7, 0x79, 0x9C,
        0x33, 0x36, 0x63,
    ],
};

pub const USER_STICK_CALIBRATION: FlashRegion = FlashRegion {
    address: 0x8010,
    data: &[ERASED; 24],
};

/// Every programmed region of the simulated flash.
pub const FLASH_REGIONS: [FlashRegion; 7] = [
    SERIAL_NUMBER,
    IMU_FACTORY_CALIBRATION,
    LEFT_STICK_FACTORY_CALIBRATION,
    BODY_COLORS,
    FACTORY_STICK_PARAMETERS,
    STICK_PARAMETERS_2,
    USER_STICK_CALIBRATION,
];

/// Fill `out` with the simulated flash contents starting at `address`.
///
/// Unprogrammed bytes read as [`ERASED`]; every region overlapping the
/// requested range is copied verbatim.
pub fn read_flash(address: u32, out: &mut [u8]) {
    out.fill(ERASED);
    for (offset, byte) in out.iter_mut().enumerate() {
        let Some(addr) = u32::try_from(offset)
            .ok()
            .and_then(|o| address.checked_add(o))
        else {
            break;
        };
        if let Some(value) = programmed_byte(addr) {
            *byte = value;
        }
    }
}

fn programmed_byte(addr: u32) -> Option<u8> {
    FLASH_REGIONS
        .iter()
        .filter(|region| (region.address..region.end()).contains(&addr))
        .find_map(|region| {
            let index = usize::try_from(addr - region.address).ok()?;
            region.data.get(index).copied()
        })
}
