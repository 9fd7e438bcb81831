//! Export formats and their fixed output filenames.

use std::fmt;
use std::str::FromStr;

use airframe_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::{dxf, step, stl};

/// A file format the solid can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Binary STL.
    Stl,
    /// ISO 10303-21 faceted B-rep.
    Step,
    /// R12 DXF with 3D faces.
    Dxf,
}

impl ExportFormat {
    /// Every format, in button order.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Stl, ExportFormat::Step, ExportFormat::Dxf];

    /// Fixed output filename.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Stl => "aircraft.stl",
            ExportFormat::Step => "aircraft.step",
            ExportFormat::Dxf => "aircraft.dxf",
        }
    }

    /// Lowercase name used on the command line and in URLs.
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Step => "step",
            ExportFormat::Dxf => "dxf",
        }
    }

    /// MIME type for downloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Stl => "model/stl",
            ExportFormat::Step => "model/step",
            ExportFormat::Dxf => "image/vnd.dxf",
        }
    }

    /// Serialize a solid to this format.
    pub fn serialize(self, solid: &Solid) -> Result<Vec<u8>> {
        let mesh = solid.to_mesh();
        match self {
            ExportFormat::Stl => stl::to_stl_bytes(&mesh),
            ExportFormat::Step => step::to_step_bytes(&mesh),
            ExportFormat::Dxf => dxf::to_dxf_bytes(&mesh),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Stl => "STL",
            ExportFormat::Step => "STEP",
            ExportFormat::Dxf => "DXF",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(ExportFormat::Stl),
            "step" | "stp" => Ok(ExportFormat::Step),
            "dxf" => Ok(ExportFormat::Dxf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airframe_kernel::Tessellation;

    #[test]
    fn fixed_file_names() {
        let names: Vec<_> = ExportFormat::ALL.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, ["aircraft.stl", "aircraft.step", "aircraft.dxf"]);
    }

    #[test]
    fn parse_names() {
        assert_eq!("STL".parse::<ExportFormat>().unwrap(), ExportFormat::Stl);
        assert_eq!("stp".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert_eq!("dxf".parse::<ExportFormat>().unwrap(), ExportFormat::Dxf);
        assert!(matches!(
            "obj".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(s)) if s == "obj"
        ));
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn serialize_dispatches_by_format() {
        let solid = Solid::sphere(1.0, Tessellation::default());
        let stl = ExportFormat::Stl.serialize(&solid).unwrap();
        assert_eq!(stl.len(), 84 + 50 * solid.to_mesh().num_triangles());
        let step = ExportFormat::Step.serialize(&solid).unwrap();
        assert!(step.starts_with(b"ISO-10303-21;"));
        let dxf = ExportFormat::Dxf.serialize(&solid).unwrap();
        assert!(dxf.starts_with(b"0\nSECTION\n2\nHEADER"));
    }
}
