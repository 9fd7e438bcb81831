//! STEP (ISO 10303-21) export as a faceted B-rep.
//!
//! Every mesh triangle becomes one planar `FACE` bounded by a `POLY_LOOP`.
//! Welded mesh vertices are written once as `CARTESIAN_POINT`s and shared by
//! reference. The faces form one `CLOSED_SHELL` inside a `FACETED_BREP`.

use airframe_kernel::TriangleMesh;

use crate::error::Result;
use crate::format::ExportFormat;

/// Writes numbered DATA section entities.
struct StepWriter {
    data: String,
    next_id: u64,
}

impl StepWriter {
    fn new() -> Self {
        Self {
            data: String::new(),
            next_id: 1,
        }
    }

    /// Append an entity and return its id.
    fn add(&mut self, entity: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.data.push_str(&format!("#{id}={entity};\n"));
        id
    }
}

fn refs(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_cartesian_point(p: [f32; 3]) -> String {
    format!(
        "CARTESIAN_POINT('',({:.9E},{:.9E},{:.9E}))",
        p[0] as f64, p[1] as f64, p[2] as f64
    )
}

fn write_header(out: &mut String, file_name: &str) {
    out.push_str("ISO-10303-21;\n");
    out.push_str("HEADER;\n");
    out.push_str("FILE_DESCRIPTION(('airframe faceted model'),'2;1');\n");
    out.push_str(&format!(
        "FILE_NAME('{file_name}','',(''),(''),'airframe','airframe','');\n"
    ));
    out.push_str("FILE_SCHEMA(('AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }'));\n");
    out.push_str("ENDSEC;\n");
}

/// Units and uncertainty for the shape representation.
fn write_context(w: &mut StepWriter) -> u64 {
    let length = w.add("(LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.))".into());
    let angle = w.add("(NAMED_UNIT(*) PLANE_ANGLE_UNIT() SI_UNIT($,.RADIAN.))".into());
    let solid_angle = w.add("(NAMED_UNIT(*) SI_UNIT($,.STERADIAN.) SOLID_ANGLE_UNIT())".into());
    let uncertainty = w.add(format!(
        "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#{length},'distance_accuracy_value','')"
    ));
    w.add(format!(
        "(GEOMETRIC_REPRESENTATION_CONTEXT(3) GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty})) \
         GLOBAL_UNIT_ASSIGNED_CONTEXT((#{length},#{angle},#{solid_angle})) REPRESENTATION_CONTEXT('',''))"
    ))
}

/// Encode a mesh as an ISO 10303-21 text file.
pub fn to_step_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    let mut w = StepWriter::new();

    let points: Vec<u64> = (0..mesh.num_vertices() as u32)
        .map(|i| w.add(write_cartesian_point(mesh.vertex(i))))
        .collect();

    let mut faces = Vec::with_capacity(mesh.num_triangles());
    for tri in mesh.indices.chunks_exact(3) {
        let corners = [
            points[tri[0] as usize],
            points[tri[1] as usize],
            points[tri[2] as usize],
        ];
        let poly_loop = w.add(format!("POLY_LOOP('',({}))", refs(&corners)));
        let bound = w.add(format!("FACE_OUTER_BOUND('',#{poly_loop},.T.)"));
        faces.push(w.add(format!("FACE('',(#{bound}))")));
    }

    let shell = w.add(format!("CLOSED_SHELL('',({}))", refs(&faces)));
    let brep = w.add(format!("FACETED_BREP('aircraft',#{shell})"));
    let context = write_context(&mut w);
    w.add(format!(
        "FACETED_BREP_SHAPE_REPRESENTATION('aircraft',(#{brep}),#{context})"
    ));

    let mut out = String::with_capacity(w.data.len() + 512);
    write_header(&mut out, ExportFormat::Step.file_name());
    out.push_str("DATA;\n");
    out.push_str(&w.data);
    out.push_str("ENDSEC;\n");
    out.push_str("END-ISO-10303-21;\n");
    Ok(out.into_bytes())
}
