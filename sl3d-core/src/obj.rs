/// Loader for the minimal OBJ subset: `v x y z` and `f a b c d` lines
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::take_till1,
    character::complete::{i64 as integer, satisfy, space0, space1},
    combinator::{eof, not},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult, Parser,
};

use crate::error::LoadError;
use crate::geometry::{Face, Mesh};

/// Text form of [`Mesh::sample_cube`].
pub const SAMPLE_CUBE_OBJ: &str = "\
v 0.000000 20.000000 20.000000
v 0.000000 0.000000 20.000000
v 20.000000 0.000000 20.000000
v 20.000000 20.000000 20.000000
v 0.000000 20.000000 0.000000
v 0.000000 0.000000 0.000000
v 20.000000 0.000000 0.000000
v 20.000000 20.000000 0.000000
f 1 2 3 4
f 8 7 6 5
f 4 3 7 8
f 5 1 4 8
f 5 6 2 1
f 2 6 7 3
";

/// Read and parse a mesh file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&text)
}

/// Parse mesh text into a `Mesh` with zero-based face indices.
///
/// Lines whose first token is neither `v` nor `f` are skipped. Face indices
/// are resolved after the whole input has been read, so every index in the
/// returned mesh is valid.
pub fn parse_obj(input: &str) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::new();
    let mut raw_faces: Vec<[i64; 4]> = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        let line_no = number + 1;

        match keyword(line) {
            Ok((rest, "v")) => {
                let malformed = || LoadError::MalformedVertex {
                    line: line_no,
                    text: line.to_string(),
                };
                let (_, (x, y, z)) = parse_vertex(rest).map_err(|_| malformed())?;
                if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                    return Err(malformed());
                }
                mesh.add_vertex(x, y, z);
            }
            Ok((rest, "f")) => {
                let (_, indices) = parse_face(rest).map_err(|_| LoadError::MalformedFace {
                    line: line_no,
                    text: line.to_string(),
                })?;
                raw_faces.push(indices);
            }
            _ => {}
        }
    }

    let vertex_count = mesh.vertices.len();
    mesh.faces.reserve(raw_faces.len());
    for (face_index, raw) in raw_faces.iter().enumerate() {
        let mut indices = [0usize; 4];
        for (slot, &index) in indices.iter_mut().zip(raw) {
            if index < 1 || index as u64 > vertex_count as u64 {
                return Err(LoadError::DanglingReference {
                    face: face_index + 1,
                    index,
                    vertex_count,
                });
            }
            *slot = (index - 1) as usize;
        }
        mesh.add_face(Face { indices });
    }

    log::debug!(
        "parsed mesh: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

fn keyword(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

/// One whitespace-separated field that must span the whole token.
fn field<'a, O, P>(parser: P) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    P: Parser<&'a str, O, nom::error::Error<&'a str>>,
{
    terminated(
        preceded(space1, parser),
        not(satisfy(|c: char| !c.is_whitespace())),
    )
}

// Anything after the third coordinate is ignored.
fn parse_vertex(input: &str) -> IResult<&str, (f32, f32, f32)> {
    tuple((field(float), field(float), field(float)))(input)
}

fn parse_face(input: &str) -> IResult<&str, [i64; 4]> {
    let (input, (a, b, c, d)) =
        tuple((field(integer), field(integer), field(integer), field(integer)))(input)?;
    let (input, _) = terminated(space0, eof)(input)?;
    Ok((input, [a, b, c, d]))
}
