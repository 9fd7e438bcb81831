//! DXF export (R12 ASCII) with one `3DFACE` per triangle.

use std::io::Write;

use airframe_kernel::TriangleMesh;

use crate::error::Result;

/// Layer holding all faces.
pub const LAYER: &str = "AIRFRAME";

/// Encode a mesh as an R12 DXF document.
pub fn to_dxf_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256 + mesh.num_triangles() * 160);
    export_to_writer(mesh, &mut out)?;
    Ok(out)
}

/// Write a mesh as an R12 DXF document to any writer.
pub fn export_to_writer<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> std::io::Result<()> {
    write_header(writer)?;
    write_tables(writer)?;
    write_entities(mesh, writer)?;
    writeln!(writer, "0")?;
    writeln!(writer, "EOF")?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "HEADER")?;
    writeln!(writer, "9")?;
    writeln!(writer, "$ACADVER")?;
    writeln!(writer, "1")?;
    writeln!(writer, "AC1009")?; // DXF R12
    writeln!(writer, "9")?;
    writeln!(writer, "$INSUNITS")?;
    writeln!(writer, "70")?;
    writeln!(writer, "4")?; // Millimeters
    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}

fn write_tables<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "TABLES")?;

    writeln!(writer, "0")?;
    writeln!(writer, "TABLE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "LAYER")?;
    writeln!(writer, "70")?;
    writeln!(writer, "1")?;

    writeln!(writer, "0")?;
    writeln!(writer, "LAYER")?;
    writeln!(writer, "2")?;
    writeln!(writer, "{LAYER}")?;
    writeln!(writer, "70")?;
    writeln!(writer, "0")?;
    writeln!(writer, "62")?;
    writeln!(writer, "7")?; // White
    writeln!(writer, "6")?;
    writeln!(writer, "CONTINUOUS")?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDTAB")?;
    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}

fn write_entities<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "ENTITIES")?;

    for tri in mesh.triangles() {
        write_3dface(writer, &tri)?;
    }

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;
    Ok(())
}

/// A triangle is written as a `3DFACE` whose fourth corner repeats the third.
fn write_3dface<W: Write>(writer: &mut W, tri: &[[f32; 3]; 3]) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "3DFACE")?;
    writeln!(writer, "8")?;
    writeln!(writer, "{LAYER}")?;
    let corners = [tri[0], tri[1], tri[2], tri[2]];
    for (i, p) in corners.iter().enumerate() {
        writeln!(writer, "{}", 10 + i)?;
        writeln!(writer, "{:.6}", p[0])?;
        writeln!(writer, "{}", 20 + i)?;
        writeln!(writer, "{:.6}", p[1])?;
        writeln!(writer, "{}", 30 + i)?;
        writeln!(writer, "{:.6}", p[2])?;
    }
    Ok(())
}
