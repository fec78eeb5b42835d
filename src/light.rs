use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::CueResult;
use crate::gamut::Gamut;
use crate::types::{ChromaticityPoint, Rgb, XY};

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct On {
    pub on: bool,
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DimmingUpdate {
    pub brightness: f64,
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColorUpdate {
    pub xy: XY,
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ColorTemperatureUpdate {
    pub mirek: u32,
}

#[derive(Copy, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MirekSchema {
    pub mirek_minimum: u32,
    pub mirek_maximum: u32,
}

impl MirekSchema {
    pub const DEFAULT: Self = Self {
        mirek_minimum: 153,
        mirek_maximum: 500,
    };

    #[must_use]
    pub fn clamp(&self, mirek: u32) -> u32 {
        mirek.clamp(self.mirek_minimum, self.mirek_maximum.max(self.mirek_minimum))
    }
}

impl Default for MirekSchema {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Converts a color temperature in kelvin to mirek (micro reciprocal degrees).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kelvin_to_mirek(kelvin: u32) -> u32 {
    if kelvin == 0 {
        return u32::MAX;
    }
    (1_000_000.0 / f64::from(kelvin)).round() as u32
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<On>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimming: Option<DimmingUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<ColorTemperatureUpdate>,
}

impl LightUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_on(self, on: bool) -> Self {
        Self {
            on: Some(On { on }),
            ..self
        }
    }

    #[must_use]
    pub const fn with_brightness(self, brightness: f64) -> Self {
        Self {
            dimming: Some(DimmingUpdate { brightness }),
            ..self
        }
    }

    #[must_use]
    pub const fn with_color_temperature(self, mirek: u32) -> Self {
        Self {
            color_temperature: Some(ColorTemperatureUpdate { mirek }),
            ..self
        }
    }

    #[must_use]
    pub const fn with_color_xy(self, xy: XY) -> Self {
        Self {
            color: Some(ColorUpdate { xy }),
            ..self
        }
    }
}

/// Control surface of a single light.
///
/// Implementors only provide the gamut of the device and a way to deliver
/// a [`LightUpdate`]; the conversions happen here.
pub trait LightControl {
    fn gamut(&self) -> &Gamut;

    fn send(&mut self, upd: LightUpdate) -> CueResult<()>;

    fn mirek_schema(&self) -> MirekSchema {
        MirekSchema::DEFAULT
    }

    fn power_on(&mut self) -> CueResult<()> {
        self.send(LightUpdate::new().with_on(true))
    }

    fn power_off(&mut self) -> CueResult<()> {
        self.send(LightUpdate::new().with_on(false))
    }

    /// Sets brightness in percent; values outside `0..=100` are clamped.
    fn set_brightness(&mut self, brightness: f64) -> CueResult<()> {
        self.send(LightUpdate::new().with_brightness(brightness.clamp(0.0, 100.0)))
    }

    /// Sets the color, moved into the gamut first. Returns the coordinate sent.
    fn set_color_xy(&mut self, xy: XY) -> CueResult<XY> {
        let xy = self.gamut().clamp(ChromaticityPoint::new(xy.x, xy.y, 0.0)).xy();
        self.send(LightUpdate::new().with_color_xy(xy))?;
        Ok(xy)
    }

    fn set_color_temperature(&mut self, mirek: u32) -> CueResult<()> {
        let mirek = self.mirek_schema().clamp(mirek);
        self.send(LightUpdate::new().with_color_temperature(mirek))
    }

    /// Converts `rgb` for this light and sets it, returning the point applied.
    fn set_color_rgb(&mut self, rgb: Rgb) -> CueResult<ChromaticityPoint> {
        let point = convert::rgb_to_xy(rgb, self.gamut());
        let xy = self.set_color_xy(point.xy())?;
        Ok(point.with_xy(xy))
    }
}

/// A light that writes every update as a line of JSON instead of sending
/// it to a device.
pub struct UpdateWriter<W: Write> {
    out: W,
    gamut: Gamut,
    schema: MirekSchema,
}

impl<W: Write> UpdateWriter<W> {
    pub const fn new(out: W, gamut: Gamut, schema: MirekSchema) -> Self {
        Self { out, gamut, schema }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LightControl for UpdateWriter<W> {
    fn gamut(&self) -> &Gamut {
        &self.gamut
    }

    fn mirek_schema(&self) -> MirekSchema {
        self.schema
    }

    fn send(&mut self, upd: LightUpdate) -> CueResult<()> {
        log::debug!("Light update: {upd:?}");
        serde_json::to_writer(&mut self.out, &upd)?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::gamut::{distance, GamutType};

    struct Recorder {
        gamut: Gamut,
        sent: Vec<LightUpdate>,
    }

    impl Recorder {
        fn new(gt: GamutType) -> Self {
            Self {
                gamut: Gamut::from(gt),
                sent: vec![],
            }
        }
    }

    impl LightControl for Recorder {
        fn gamut(&self) -> &Gamut {
            &self.gamut
        }

        fn send(&mut self, upd: LightUpdate) -> CueResult<()> {
            self.sent.push(upd);
            Ok(())
        }
    }

    #[test]
    fn power_commands() {
        let mut light = Recorder::new(GamutType::C);
        light.power_on().unwrap();
        light.power_off().unwrap();

        assert_eq!(
            light.sent,
            [
                LightUpdate::new().with_on(true),
                LightUpdate::new().with_on(false)
            ]
        );
    }

    #[test]
    fn brightness_is_clamped() {
        let mut light = Recorder::new(GamutType::C);
        light.set_brightness(140.0).unwrap();
        light.set_brightness(-3.0).unwrap();

        let levels: Vec<f64> = light
            .sent
            .iter()
            .filter_map(|u| u.dimming.map(|d| d.brightness))
            .collect();
        assert_eq!(levels, [100.0, 0.0]);
    }

    #[test]
    fn xy_outside_gamut_is_clamped() {
        let mut light = Recorder::new(GamutType::Full);
        light.set_color_xy(XY::new(0.8, 0.8)).unwrap();

        let xy = light.sent[0].color.unwrap().xy;
        assert!((xy.x - 0.5).abs() < 1e-9);
        assert!((xy.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rgb_goes_through_converter() {
        let mut light = Recorder::new(GamutType::C);
        let point = light.set_color_rgb(Rgb::new(255, 255, 255)).unwrap();

        assert_eq!(light.sent.len(), 1);
        assert_eq!(light.sent[0].color.unwrap().xy, point.xy());
        assert!((point.x - 0.3127).abs() < 1e-4);
    }

    #[test]
    fn black_reports_the_sent_coordinate() {
        let mut light = Recorder::new(GamutType::C);
        let point = light.set_color_rgb(Rgb::new(0, 0, 0)).unwrap();

        let sent = light.sent[0].color.unwrap().xy;
        assert_eq!(point.xy(), sent);
        assert!(distance(sent, light.gamut().vertices().blue) < 1e-9);
        assert!(point.brightness.abs() < f64::EPSILON);
    }

    #[test]
    fn xy_returns_sent_coordinate() {
        let mut light = Recorder::new(GamutType::Full);
        let xy = light.set_color_xy(XY::new(0.8, 0.8)).unwrap();
        assert_eq!(light.sent[0].color.unwrap().xy, xy);
    }

    #[test]
    fn temperature_respects_schema() {
        let mut light = Recorder::new(GamutType::C);
        light.set_color_temperature(kelvin_to_mirek(6500)).unwrap();
        light.set_color_temperature(kelvin_to_mirek(1000)).unwrap();

        let mireks: Vec<u32> = light
            .sent
            .iter()
            .filter_map(|u| u.color_temperature.map(|c| c.mirek))
            .collect();
        assert_eq!(mireks, [154, 500]);
    }

    #[test]
    fn kelvin_conversion() {
        assert_eq!(kelvin_to_mirek(2700), 370);
        assert_eq!(kelvin_to_mirek(0), u32::MAX);
    }

    #[test]
    fn writer_emits_json_lines() {
        let gamut = Gamut::from(GamutType::C);
        let mut light = UpdateWriter::new(vec![], gamut, MirekSchema::DEFAULT);
        light.power_on().unwrap();
        light.set_brightness(50.0).unwrap();

        let out = String::from_utf8(light.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(
            lines,
            [
                json!({"on": {"on": true}}),
                json!({"dimming": {"brightness": 50.0}})
            ]
        );
    }
}
