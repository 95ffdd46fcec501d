//! Recursive-descent parser for the scene description format.
//!
//! The parser walks the input byte by byte through a [`Cursor`] that owns
//! the position and line state, so parsing is a pure function from text to
//! `Result` with no process-wide state and no exit paths.

use glam::DVec3;
use thiserror::Error;

use crate::scene::{Camera, Plane, Scene, SceneObject, Sphere};

/// Maximum accepted string length, in bytes.
const MAX_STRING_LEN: usize = 128;

/// Errors that can occur while reading a scene description.
///
/// Every variant that corresponds to a position in the input carries the
/// 1-based line number where the problem was found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected '{0}' on line {1}")]
    ExpectedToken(char, usize),

    #[error("expected a string on line {0}")]
    ExpectedString(usize),

    #[error("unexpected end of file on line {0}")]
    UnexpectedEof(usize),

    #[error("strings longer than 128 characters are not supported")]
    StringTooLong,

    #[error("strings with escape codes are not supported")]
    UnsupportedEscape,

    #[error("strings may contain only ascii characters")]
    NonAsciiChar,

    #[error("unknown type \"{0}\" on line {1}")]
    UnknownType(String, usize),

    #[error("unknown property \"{0}\" on line {1}")]
    UnknownField(String, usize),

    #[error("invalid {0} value on line {1} (must be greater than 0)")]
    NonPositiveValue(String, usize),

    #[error("malformed scene structure on line {0}")]
    MalformedStructure(usize),

    #[error("malformed number on line {0}")]
    MalformedNumber(usize),

    #[error("duplicate property \"{0}\" on line {1}")]
    DuplicateField(String, usize),

    #[error("{0} object on line {2} is missing its \"{1}\" property")]
    IncompleteObject(&'static str, &'static str, usize),

    #[error("color component out of range on line {0} (must be within 0-1)")]
    ColorOutOfRange(usize),
}

/// Byte cursor over the input with 1-based line tracking.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Advance past a byte already obtained from `peek`.
    fn bump(&mut self, byte: u8) {
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
    }

    /// Consume and return the next byte; end of input is always an error.
    fn next(&mut self) -> Result<u8, ParseError> {
        let byte = self.peek().ok_or(ParseError::UnexpectedEof(self.line))?;
        self.bump(byte);
        Ok(byte)
    }

    /// Consume the next byte and require it to be `expected`.
    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        let byte = self.next()?;
        if byte != expected {
            return Err(ParseError::ExpectedToken(expected as char, self.line));
        }
        Ok(())
    }

    /// Skip spaces, tabs, newlines and carriage returns.
    fn skip_ws(&mut self) {
        while let Some(byte @ (b' ' | b'\t' | b'\n' | b'\r')) = self.peek() {
            self.bump(byte);
        }
    }

    /// Read a double-quoted string: ASCII only, no escapes, at most
    /// [`MAX_STRING_LEN`] bytes.
    fn next_string(&mut self) -> Result<String, ParseError> {
        if self.next()? != b'"' {
            return Err(ParseError::ExpectedString(self.line));
        }

        let mut buffer = String::new();
        loop {
            let byte = self.next()?;
            if byte == b'"' {
                return Ok(buffer);
            }
            if buffer.len() >= MAX_STRING_LEN {
                return Err(ParseError::StringTooLong);
            }
            if byte == b'\\' {
                return Err(ParseError::UnsupportedEscape);
            }
            if !(32..=126).contains(&byte) {
                return Err(ParseError::NonAsciiChar);
            }
            buffer.push(byte as char);
        }
    }

    /// Scan a floating-point number: optional sign, digits, optional
    /// fraction, optional exponent.
    fn next_number(&mut self) -> Result<f64, ParseError> {
        let mut text = String::new();

        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            text.push(sign as char);
            self.bump(sign);
        }
        while let Some(byte @ (b'0'..=b'9' | b'.')) = self.peek() {
            text.push(byte as char);
            self.bump(byte);
        }
        if let Some(exp @ (b'e' | b'E')) = self.peek() {
            text.push(exp as char);
            self.bump(exp);
            if let Some(sign @ (b'+' | b'-')) = self.peek() {
                text.push(sign as char);
                self.bump(sign);
            }
            while let Some(digit @ b'0'..=b'9') = self.peek() {
                text.push(digit as char);
                self.bump(digit);
            }
        }

        text.parse::<f64>()
            .map_err(|_| ParseError::MalformedNumber(self.line))
    }

    /// Read a 3-element vector `[a, b, c]`.
    fn next_vector(&mut self) -> Result<DVec3, ParseError> {
        self.expect(b'[')?;
        self.skip_ws();
        let x = self.next_number()?;
        self.skip_ws();
        self.expect(b',')?;
        self.skip_ws();
        let y = self.next_number()?;
        self.skip_ws();
        self.expect(b',')?;
        self.skip_ws();
        let z = self.next_number()?;
        self.skip_ws();
        self.expect(b']')?;
        Ok(DVec3::new(x, y, z))
    }
}

/// Accumulates fields for one object; the variant gates which fields are
/// legal, replacing the write-into-any-slot behavior a tagless union would
/// allow.
enum ObjectBuilder {
    Camera {
        width: Option<f64>,
        height: Option<f64>,
    },
    Sphere {
        color: Option<DVec3>,
        position: Option<DVec3>,
        radius: Option<f64>,
    },
    Plane {
        color: Option<DVec3>,
        position: Option<DVec3>,
        normal: Option<DVec3>,
    },
}

impl ObjectBuilder {
    fn new(type_name: &str, line: usize) -> Result<Self, ParseError> {
        match type_name {
            "camera" => Ok(Self::Camera {
                width: None,
                height: None,
            }),
            "sphere" => Ok(Self::Sphere {
                color: None,
                position: None,
                radius: None,
            }),
            "plane" => Ok(Self::Plane {
                color: None,
                position: None,
                normal: None,
            }),
            other => Err(ParseError::UnknownType(other.to_string(), line)),
        }
    }

    /// Check that every required field arrived and build the final object.
    fn finish(self, line: usize) -> Result<SceneObject, ParseError> {
        match self {
            Self::Camera { width, height } => Ok(SceneObject::Camera(Camera {
                width: width.ok_or(ParseError::IncompleteObject("camera", "width", line))?,
                height: height.ok_or(ParseError::IncompleteObject("camera", "height", line))?,
            })),
            Self::Sphere {
                color,
                position,
                radius,
            } => Ok(SceneObject::Sphere(Sphere {
                color: color.ok_or(ParseError::IncompleteObject("sphere", "color", line))?,
                position: position
                    .ok_or(ParseError::IncompleteObject("sphere", "position", line))?,
                radius: radius.ok_or(ParseError::IncompleteObject("sphere", "radius", line))?,
            })),
            Self::Plane {
                color,
                position,
                normal,
            } => Ok(SceneObject::Plane(Plane {
                color: color.ok_or(ParseError::IncompleteObject("plane", "color", line))?,
                position: position
                    .ok_or(ParseError::IncompleteObject("plane", "position", line))?,
                normal: normal.ok_or(ParseError::IncompleteObject("plane", "normal", line))?,
            })),
        }
    }
}

/// Parse a complete scene description.
///
/// Consumes the whole top-level array; any syntax or validation problem
/// aborts with the first error encountered, so a partially valid scene is
/// never returned.
pub fn parse(input: &str) -> Result<Scene, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut objects = Vec::new();

    cursor.skip_ws();
    cursor.expect(b'[')?;
    cursor.skip_ws();

    // A scene with no objects at all is an error, not an empty render.
    if cursor.peek() == Some(b']') {
        return Err(ParseError::MalformedStructure(cursor.line));
    }

    loop {
        cursor.expect(b'{')?;
        objects.push(parse_object(&mut cursor)?);

        cursor.skip_ws();
        match cursor.next()? {
            b',' => cursor.skip_ws(),
            b']' => break,
            _ => return Err(ParseError::ExpectedToken(',', cursor.line)),
        }
    }

    Ok(Scene::new(objects))
}

/// Parse one `{ "type": ..., ... }` object. The opening brace has already
/// been consumed.
fn parse_object(cursor: &mut Cursor<'_>) -> Result<SceneObject, ParseError> {
    let start_line = cursor.line;
    cursor.skip_ws();

    // Every object must declare its type before any other field.
    let key = cursor.next_string()?;
    if key != "type" {
        return Err(ParseError::MalformedStructure(cursor.line));
    }
    cursor.skip_ws();
    cursor.expect(b':')?;
    cursor.skip_ws();

    let type_name = cursor.next_string()?;
    let mut builder = ObjectBuilder::new(&type_name, cursor.line)?;
    cursor.skip_ws();

    loop {
        match cursor.next()? {
            b'}' => break,
            b',' => {
                cursor.skip_ws();
                let name = cursor.next_string()?;
                cursor.skip_ws();
                cursor.expect(b':')?;
                cursor.skip_ws();
                parse_field(cursor, &mut builder, &name)?;
                cursor.skip_ws();
            }
            _ => return Err(ParseError::ExpectedToken(',', cursor.line)),
        }
    }

    builder.finish(start_line)
}

/// Parse one field value into the builder slot legal for the declared type.
fn parse_field(
    cursor: &mut Cursor<'_>,
    builder: &mut ObjectBuilder,
    name: &str,
) -> Result<(), ParseError> {
    match builder {
        ObjectBuilder::Camera { width, height } => match name {
            "width" => {
                let value = next_positive(cursor, name)?;
                set_scalar(width, name, value, cursor.line)
            }
            "height" => {
                let value = next_positive(cursor, name)?;
                set_scalar(height, name, value, cursor.line)
            }
            // The grammar allows a color on any object; a camera has no use
            // for it, so the value is consumed and dropped.
            "color" => {
                next_color(cursor)?;
                Ok(())
            }
            _ => Err(ParseError::UnknownField(name.to_string(), cursor.line)),
        },
        ObjectBuilder::Sphere {
            color,
            position,
            radius,
        } => match name {
            "color" => {
                let value = next_color(cursor)?;
                set_vector(color, name, value, cursor.line)
            }
            "position" => {
                let value = cursor.next_vector()?;
                set_vector(position, name, value, cursor.line)
            }
            "radius" => {
                let value = next_positive(cursor, name)?;
                set_scalar(radius, name, value, cursor.line)
            }
            _ => Err(ParseError::UnknownField(name.to_string(), cursor.line)),
        },
        ObjectBuilder::Plane {
            color,
            position,
            normal,
        } => match name {
            "color" => {
                let value = next_color(cursor)?;
                set_vector(color, name, value, cursor.line)
            }
            "position" => {
                let value = cursor.next_vector()?;
                set_vector(position, name, value, cursor.line)
            }
            "normal" => {
                let value = cursor.next_vector()?;
                set_vector(normal, name, value, cursor.line)
            }
            _ => Err(ParseError::UnknownField(name.to_string(), cursor.line)),
        },
    }
}

/// Read a scalar that must be strictly positive.
fn next_positive(cursor: &mut Cursor<'_>, name: &str) -> Result<f64, ParseError> {
    let value = cursor.next_number()?;
    if value <= 0.0 {
        return Err(ParseError::NonPositiveValue(name.to_string(), cursor.line));
    }
    Ok(value)
}

/// Read a color vector and require every component within 0-1.
fn next_color(cursor: &mut Cursor<'_>) -> Result<DVec3, ParseError> {
    let color = cursor.next_vector()?;
    if [color.x, color.y, color.z]
        .iter()
        .any(|component| !(0.0..=1.0).contains(component))
    {
        return Err(ParseError::ColorOutOfRange(cursor.line));
    }
    Ok(color)
}

fn set_scalar(
    slot: &mut Option<f64>,
    name: &str,
    value: f64,
    line: usize,
) -> Result<(), ParseError> {
    if slot.replace(value).is_some() {
        return Err(ParseError::DuplicateField(name.to_string(), line));
    }
    Ok(())
}

fn set_vector(
    slot: &mut Option<DVec3>,
    name: &str,
    value: DVec3,
    line: usize,
) -> Result<(), ParseError> {
    if slot.replace(value).is_some() {
        return Err(ParseError::DuplicateField(name.to_string(), line));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_SCENE: &str = r#"
[
    { "type": "camera", "width": 2.0, "height": 2.0 },
    { "type": "sphere", "color": [1, 0, 0], "position": [0, 0, 5], "radius": 1 },
    { "type": "plane", "color": [0, 1, 0], "position": [0, -1, 0], "normal": [0, 1, 0] }
]
"#;

    #[test]
    fn test_parse_basic_scene() {
        let scene = parse(BASIC_SCENE).unwrap();
        assert_eq!(scene.object_count(), 3);

        let camera = scene.camera().unwrap();
        assert_eq!(camera.width, 2.0);
        assert_eq!(camera.height, 2.0);

        match &scene.objects()[1] {
            SceneObject::Sphere(sphere) => {
                assert_eq!(sphere.color, DVec3::new(1.0, 0.0, 0.0));
                assert_eq!(sphere.position, DVec3::new(0.0, 0.0, 5.0));
                assert_eq!(sphere.radius, 1.0);
            }
            other => panic!("expected a sphere, got {other:?}"),
        }

        match &scene.objects()[2] {
            SceneObject::Plane(plane) => {
                assert_eq!(plane.normal, DVec3::new(0.0, 1.0, 0.0));
            }
            other => panic!("expected a plane, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(BASIC_SCENE).unwrap();
        let second = parse(BASIC_SCENE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_preserves_declaration_order() {
        let scene = parse(BASIC_SCENE).unwrap();
        let names: Vec<_> = scene.objects().iter().map(SceneObject::type_name).collect();
        assert_eq!(names, ["camera", "sphere", "plane"]);
    }

    #[test]
    fn test_numbers_with_signs_and_exponents() {
        let scene = parse(
            r#"[ { "type": "sphere", "color": [1, 0, 0],
                   "position": [-1.5, +2.0, 1e1], "radius": 2.5e-1 } ]"#,
        )
        .unwrap();

        match &scene.objects()[0] {
            SceneObject::Sphere(sphere) => {
                assert_eq!(sphere.position, DVec3::new(-1.5, 2.0, 10.0));
                assert_eq!(sphere.radius, 0.25);
            }
            other => panic!("expected a sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_camera_accepts_unused_color() {
        let scene = parse(
            r#"[ { "type": "camera", "width": 1.0, "height": 1.0, "color": [0.2, 0.2, 0.2] } ]"#,
        )
        .unwrap();
        assert_eq!(scene.camera_count(), 1);
    }

    #[test]
    fn test_empty_scene_is_rejected() {
        assert!(matches!(parse("[]"), Err(ParseError::MalformedStructure(1))));
    }

    #[test]
    fn test_truncated_input() {
        let err = parse(r#"[ { "type": "camera", "width": 1.0"#).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse(r#"[ { "type": "cam"#).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn test_unknown_type() {
        let err = parse(r#"[ { "type": "cube", "width": 1.0 } ]"#).unwrap_err();
        assert_eq!(err, ParseError::UnknownType("cube".to_string(), 1));
    }

    #[test]
    fn test_unknown_field() {
        let err = parse(r#"[ { "type": "camera", "depth": 1.0 } ]"#).unwrap_err();
        assert_eq!(err, ParseError::UnknownField("depth".to_string(), 1));
    }

    #[test]
    fn test_field_on_wrong_object_kind() {
        // radius is a sphere field; a plane must not accept it
        let err = parse(
            r#"[ { "type": "plane", "color": [0, 1, 0], "position": [0, -1, 0], "radius": 1 } ]"#,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::UnknownField("radius".to_string(), 1));
    }

    #[test]
    fn test_negative_radius() {
        let err = parse(
            r#"[ { "type": "sphere", "color": [1, 0, 0], "position": [0, 0, 5], "radius": -1 } ]"#,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::NonPositiveValue("radius".to_string(), 1));
    }

    #[test]
    fn test_zero_width() {
        let err = parse(r#"[ { "type": "camera", "width": 0, "height": 1.0 } ]"#).unwrap_err();
        assert_eq!(err, ParseError::NonPositiveValue("width".to_string(), 1));
    }

    #[test]
    fn test_string_length_limit() {
        let long = "a".repeat(129);
        let input = format!(r#"[ {{ "type": "{long}" }} ]"#);
        assert_eq!(parse(&input).unwrap_err(), ParseError::StringTooLong);

        // 128 characters is still within the limit; it fails later as an
        // unknown type, not as an oversized string
        let edge = "a".repeat(128);
        let input = format!(r#"[ {{ "type": "{edge}" }} ]"#);
        assert_eq!(
            parse(&input).unwrap_err(),
            ParseError::UnknownType(edge, 1)
        );
    }

    #[test]
    fn test_escape_codes_rejected() {
        let err = parse("[ { \"type\": \"cam\\era\" } ]").unwrap_err();
        assert_eq!(err, ParseError::UnsupportedEscape);
    }

    #[test]
    fn test_non_ascii_rejected() {
        let err = parse("[ { \"type\": \"caméra\" } ]").unwrap_err();
        assert_eq!(err, ParseError::NonAsciiChar);
    }

    #[test]
    fn test_color_out_of_range() {
        let err = parse(
            r#"[ { "type": "sphere", "color": [1.5, 0, 0], "position": [0, 0, 5], "radius": 1 } ]"#,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::ColorOutOfRange(1));
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse(r#"[ { "type": "camera", "width": 1.0, "width": 2.0 } ]"#).unwrap_err();
        assert_eq!(err, ParseError::DuplicateField("width".to_string(), 1));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse(
            r#"[ { "type": "sphere", "color": [1, 0, 0], "position": [0, 0, 5] } ]"#,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::IncompleteObject("sphere", "radius", 1));
    }

    #[test]
    fn test_malformed_number() {
        let err = parse(r#"[ { "type": "camera", "width": 1.2.3, "height": 1.0 } ]"#).unwrap_err();
        assert_eq!(err, ParseError::MalformedNumber(1));
    }

    #[test]
    fn test_type_must_come_first() {
        let err = parse(r#"[ { "width": 1.0, "type": "camera", "height": 1.0 } ]"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedStructure(1)));
    }

    #[test]
    fn test_missing_colon() {
        let err = parse(r#"[ { "type" "camera" } ]"#).unwrap_err();
        assert_eq!(err, ParseError::ExpectedToken(':', 1));
    }

    #[test]
    fn test_error_reports_line_number() {
        let input = "[\n  { \"type\": \"camera\",\n    \"width\": -1,\n    \"height\": 1 }\n]";
        let err = parse(input).unwrap_err();
        assert_eq!(err, ParseError::NonPositiveValue("width".to_string(), 3));
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let tight = parse(r#"[{"type":"camera","width":1,"height":1}]"#).unwrap();
        let airy = parse("[\r\n\t{ \"type\"\t:\n\"camera\" ,\n \"width\" : 1 ,\n \"height\" : 1\n}\n]").unwrap();
        assert_eq!(tight, airy);
    }
}
