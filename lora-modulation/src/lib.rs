#![cfg_attr(not(test), no_std)]

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Channel width.
pub enum Bandwidth {
    _7KHz,
    _10KHz,
    _15KHz,
    _20KHz,
    _31KHz,
    _41KHz,
    _62KHz,
    _125KHz,
    _250KHz,
    _500KHz,
}

impl Bandwidth {
    pub const fn hz(self) -> u32 {
        match self {
            Bandwidth::_7KHz => 7810u32,
            Bandwidth::_10KHz => 10420u32,
            Bandwidth::_15KHz => 15630u32,
            Bandwidth::_20KHz => 20830u32,
            Bandwidth::_31KHz => 31250u32,
            Bandwidth::_41KHz => 41670u32,
            Bandwidth::_62KHz => 62500u32,
            Bandwidth::_125KHz => 125000u32,
            Bandwidth::_250KHz => 250000u32,
            Bandwidth::_500KHz => 500000u32,
        }
    }
}

impl From<Bandwidth> for u32 {
    fn from(value: Bandwidth) -> Self {
        value.hz()
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Controls the chirp rate. Lower values are slower bandwidth, but more robust.
pub enum SpreadingFactor {
    _5,
    _6,
    _7,
    _8,
    _9,
    _10,
    _11,
    _12,
}

impl SpreadingFactor {
    pub const fn factor(self) -> u32 {
        match self {
            SpreadingFactor::_5 => 5,
            SpreadingFactor::_6 => 6,
            SpreadingFactor::_7 => 7,
            SpreadingFactor::_8 => 8,
            SpreadingFactor::_9 => 9,
            SpreadingFactor::_10 => 10,
            SpreadingFactor::_11 => 11,
            SpreadingFactor::_12 => 12,
        }
    }
}

impl From<SpreadingFactor> for u32 {
    fn from(sf: SpreadingFactor) -> Self {
        sf.factor()
    }
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Controls the forward error correction. Higher values are more robust, but reduces the ratio
/// of actual data in transmissions.
pub enum CodingRate {
    _4_5,
    _4_6,
    _4_7,
    _4_8,
}

impl CodingRate {
    /// Denominator of the coding rate, ie: 5 for 4/5.
    pub const fn denominator(self) -> u32 {
        match self {
            CodingRate::_4_5 => 5,
            CodingRate::_4_6 => 6,
            CodingRate::_4_7 => 7,
            CodingRate::_4_8 => 8,
        }
    }
}

/// Modulation parameters of a LoRa channel, independent of the carrier frequency.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseBandModulationParams {
    pub sf: SpreadingFactor,
    pub bw: Bandwidth,
    pub cr: CodingRate,
    /// Low data rate optimization, mandated when the symbol time exceeds 16 ms.
    pub ldro: bool,
}

impl BaseBandModulationParams {
    /// Build the parameters, deriving low data rate optimization from sf and bw.
    pub const fn new(sf: SpreadingFactor, bw: Bandwidth, cr: CodingRate) -> Self {
        // symbol time of 2^sf / bw above 16 ms
        let ldro = (1u32 << sf.factor()) * 1000 / bw.hz() >= 16;
        Self { sf, bw, cr, ldro }
    }

    /// Duration of a single symbol in microseconds.
    pub const fn symbol_time_us(&self) -> u32 {
        ((1u64 << self.sf.factor()) * 1_000_000 / self.bw.hz() as u64) as u32
    }

    /// Time on air of a frame with `length` payload bytes in microseconds, rounded up.
    ///
    /// `preamble` is the programmed preamble length in symbols (8 when `None`). The frame is
    /// assumed to carry a payload CRC. SF5 and SF6 always use at least 12 preamble symbols.
    pub fn time_on_air_us(&self, preamble: Option<u8>, explicit_header: bool, length: u8) -> u32 {
        let sf = self.sf.factor() as i32;
        let mut preamble = preamble.unwrap_or(8) as i32;
        if sf <= 6 && preamble < 12 {
            preamble = 12;
        }

        let mut numerator = ((length as i32) << 3) + 16 - 4 * sf;
        if explicit_header {
            numerator += 20;
        }
        let denominator = if sf <= 6 {
            4 * sf
        } else {
            numerator += 8;
            if self.ldro {
                4 * (sf - 2)
            } else {
                4 * sf
            }
        };
        let numerator = numerator.max(0);

        // symbols, scaled by 4 so the 4.25 symbol preamble tail stays integral
        let mut symbols = ((numerator + denominator - 1) / denominator)
            * self.cr.denominator() as i32
            + preamble
            + 12;
        if sf <= 6 {
            symbols += 2;
        }
        let chips = ((4 * symbols + 1) as u64) << (sf - 2);

        let bw = self.bw.hz() as u64;
        ((chips * 1_000_000 + bw - 1) / bw) as u32
    }
}
