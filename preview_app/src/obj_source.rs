//! OBJ-backed model source
//!
//! Resolves model references as filesystem paths to Wavefront OBJ files.
//! Parsing is synchronous, so a ticket resolves on its first poll; the
//! viewer neither knows nor cares, it polls the same way it would a
//! network-backed source.

use model_viewer::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<ObjError> for AssetError {
    fn from(error: ObjError) -> Self {
        match error {
            ObjError::Io(io) => Self::Io(io),
            ObjError::ParseError(message) => Self::LoadFailed(message),
            ObjError::InvalidFormat(message) => Self::InvalidData(message),
        }
    }
}

/// Model source reading OBJ files from disk
#[derive(Default)]
pub struct ObjSource {
    next_id: u64,
    in_flight: HashMap<u64, String>,
}

impl ModelSource for ObjSource {
    fn begin_load(&mut self, reference: &str) -> LoadTicket {
        self.next_id += 1;
        self.in_flight.insert(self.next_id, reference.to_owned());
        LoadTicket::new(self.next_id)
    }

    fn poll(&mut self, ticket: LoadTicket) -> LoadPoll {
        let Some(reference) = self.in_flight.remove(&ticket.id()) else {
            return LoadPoll::Failed(AssetError::NotFound(format!(
                "unknown ticket {}",
                ticket.id()
            )));
        };
        match load_obj_graph(&reference) {
            Ok(graph) => LoadPoll::Ready(graph),
            Err(error) => LoadPoll::Failed(error.into()),
        }
    }

    fn cancel(&mut self, ticket: LoadTicket) {
        self.in_flight.remove(&ticket.id());
    }
}

/// Parse an OBJ file into a one-node scene graph
///
/// Positions, normals, and texture coordinates are supported; faces with
/// more than three vertices are fan-triangulated. Material libraries are
/// ignored and a neutral material is assigned instead.
pub fn load_obj_graph<P: AsRef<Path>>(path: P) -> Result<SceneGraph, ObjError> {
    let name = path
        .as_ref()
        .file_stem()
        .map_or_else(|| "model".to_owned(), |s| s.to_string_lossy().into_owned());
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut tex_coords = Vec::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" if parts.len() >= 4 => {
                positions.push(parse_vec3(&parts[1..4], "vertex")?);
            }
            "vn" if parts.len() >= 4 => {
                normals.push(parse_vec3(&parts[1..4], "normal")?);
            }
            "vt" if parts.len() >= 3 => {
                tex_coords.push([
                    parse_component(parts[1], "tex coord u")?,
                    parse_component(parts[2], "tex coord v")?,
                ]);
            }
            "f" if parts.len() >= 4 => {
                let mut face_indices = Vec::with_capacity(parts.len() - 1);
                for corner in &parts[1..] {
                    let vertex = parse_corner(corner, &positions, &normals, &tex_coords)?;
                    vertices.push(vertex);
                    face_indices.push((vertices.len() - 1) as u32);
                }
                // Fan triangulation.
                for i in 1..(face_indices.len() - 1) {
                    indices.push(face_indices[0]);
                    indices.push(face_indices[i]);
                    indices.push(face_indices[i + 1]);
                }
            }
            _ => {}
        }
    }

    if vertices.is_empty() {
        return Err(ObjError::InvalidFormat("no faces in OBJ file".to_owned()));
    }

    let mut graph = SceneGraph::new();
    let node = SceneNode::new(name)
        .with_mesh(Mesh::new(vertices, indices))
        .with_material(
            Material::new()
                .with_color(0.8, 0.7, 0.5)
                .with_metallic(0.1)
                .with_roughness(0.3),
        );
    graph.insert_child(graph.root(), node);
    Ok(graph)
}

fn parse_component(text: &str, what: &str) -> Result<f32, ObjError> {
    text.parse()
        .map_err(|_| ObjError::ParseError(format!("invalid {what}: {text}")))
}

fn parse_vec3(parts: &[&str], what: &str) -> Result<[f32; 3], ObjError> {
    Ok([
        parse_component(parts[0], what)?,
        parse_component(parts[1], what)?,
        parse_component(parts[2], what)?,
    ])
}

/// Parse one `v/vt/vn` face corner into a vertex (indices are 1-based)
fn parse_corner(
    corner: &str,
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    tex_coords: &[[f32; 2]],
) -> Result<Vertex, ObjError> {
    let mut fields = corner.split('/');
    let position_index: usize = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ObjError::ParseError(format!("empty face corner: {corner}")))?
        .parse()
        .map_err(|_| ObjError::ParseError(format!("invalid position index: {corner}")))?;
    // OBJ indices are 1-based; 0 is malformed, not "before the first".
    let position = position_index
        .checked_sub(1)
        .and_then(|i| positions.get(i))
        .ok_or_else(|| ObjError::InvalidFormat("position index out of bounds".to_owned()))?;

    let tex_coord = fields
        .next()
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| tex_coords.get(i))
        .copied()
        .unwrap_or([0.0, 0.0]);

    let normal = fields
        .next()
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<usize>().ok())
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| normals.get(i))
        .copied()
        .unwrap_or([0.0, 1.0, 0.0]);

    Ok(Vertex::new(*position, normal, tex_coord))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_triangle() {
        let path = write_temp_obj(
            "preview_triangle.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );
        let graph = load_obj_graph(&path).unwrap();
        let mesh_node = graph
            .depth_first()
            .into_iter()
            .find_map(|id| graph.node(id).filter(|n| n.mesh.is_some()))
            .expect("mesh node");
        let mesh = mesh_node.mesh.as_ref().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh_node.name, "preview_triangle");
    }

    #[test]
    fn fan_triangulates_quads() {
        let path = write_temp_obj(
            "preview_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let graph = load_obj_graph(&path).unwrap();
        let mesh = graph
            .depth_first()
            .into_iter()
            .find_map(|id| graph.node(id).and_then(|n| n.mesh.as_ref()))
            .expect("mesh");
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn zero_face_index_is_rejected_as_invalid() {
        // Indices are 1-based, so 0 is malformed input, not a crash.
        let path = write_temp_obj(
            "preview_zero_index.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n",
        );
        assert!(matches!(
            load_obj_graph(&path),
            Err(ObjError::InvalidFormat(_))
        ));
    }

    #[test]
    fn zero_optional_indices_fall_back_to_defaults() {
        let path = write_temp_obj(
            "preview_zero_optional.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/0/0 2/0/0 3/0/0\n",
        );
        let graph = load_obj_graph(&path).unwrap();
        let mesh = graph
            .depth_first()
            .into_iter()
            .find_map(|id| graph.node(id).and_then(|n| n.mesh.as_ref()))
            .expect("mesh");
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn rejects_an_empty_file() {
        let path = write_temp_obj("preview_empty.obj", "# nothing here\n");
        assert!(matches!(
            load_obj_graph(&path),
            Err(ObjError::InvalidFormat(_))
        ));
    }

    #[test]
    fn source_resolves_through_the_ticket_protocol() {
        let path = write_temp_obj(
            "preview_source.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\nvn 0 0 1\n",
        );
        let mut source = ObjSource::default();
        let ticket = source.begin_load(path.to_str().unwrap());
        assert!(matches!(source.poll(ticket), LoadPoll::Ready(_)));
    }

    #[test]
    fn missing_file_fails_the_load() {
        let mut source = ObjSource::default();
        let ticket = source.begin_load("/nonexistent/model.obj");
        assert!(matches!(source.poll(ticket), LoadPoll::Failed(_)));
    }
}
