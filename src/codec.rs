//! Binary backing-store format: a `u32` little-endian record count followed
//! by that many fixed-size records, no delimiters, no checksum, no version
//! tag. Writes are whole-file overwrites; reads are whole-file from offset
//! zero. A missing file reads as an empty table.

use crate::model::{
    AttendanceMark, Class, Evaluation, Grades, Student, MAX_ATTENDANCE, MAX_EVALUATIONS,
};
use anyhow::{bail, Context};
use std::io;
use std::path::Path;

const DISCIPLINE_FIELD: usize = 100;
const PROFESSOR_FIELD: usize = 100;
const NAME_FIELD: usize = 100;
const COMMENT_FIELD: usize = 500;
const DATE_FIELD: usize = 11;

const EVAL_SLOT_LEN: usize = 4 + COMMENT_FIELD + DATE_FIELD;
const ATT_SLOT_LEN: usize = DATE_FIELD + 1;

pub const CLASS_RECORD_LEN: usize = 4 + DISCIPLINE_FIELD + PROFESSOR_FIELD;
pub const STUDENT_RECORD_LEN: usize = 4
    + 4
    + NAME_FIELD
    + 4 * 4
    + 4
    + MAX_EVALUATIONS * EVAL_SLOT_LEN
    + 4
    + MAX_ATTENDANCE * ATT_SLOT_LEN;

/// Truncates to at most `max` bytes without splitting a UTF-8 character.
fn clamp(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn put_str(out: &mut Vec<u8>, s: &str, field: usize) {
    let bytes = clamp(s, field - 1).as_bytes();
    out.extend_from_slice(bytes);
    out.resize(out.len() + (field - bytes.len()), 0);
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let s = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        s
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take(4).try_into().unwrap_or([0; 4]))
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take(4).try_into().unwrap_or([0; 4]))
    }

    fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take(4).try_into().unwrap_or([0; 4]))
    }

    fn str(&mut self, field: usize) -> String {
        let raw = self.take(field);
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }
}

fn encode_class(out: &mut Vec<u8>, c: &Class) {
    out.extend_from_slice(&c.id.to_le_bytes());
    put_str(out, &c.discipline, DISCIPLINE_FIELD);
    put_str(out, &c.professor, PROFESSOR_FIELD);
}

fn decode_class(r: &mut Reader<'_>) -> Class {
    Class {
        id: r.i32(),
        discipline: r.str(DISCIPLINE_FIELD),
        professor: r.str(PROFESSOR_FIELD),
    }
}

fn encode_student(out: &mut Vec<u8>, s: &Student) {
    out.extend_from_slice(&s.class_id.to_le_bytes());
    out.extend_from_slice(&s.enrollment.to_le_bytes());
    put_str(out, &s.name, NAME_FIELD);
    for v in [s.grades.np1, s.grades.np2, s.grades.pim, s.grades.average] {
        out.extend_from_slice(&v.to_le_bytes());
    }

    let evals = &s.evaluations[..s.evaluations.len().min(MAX_EVALUATIONS)];
    out.extend_from_slice(&(evals.len() as u32).to_le_bytes());
    for i in 0..MAX_EVALUATIONS {
        match evals.get(i) {
            Some(e) => {
                out.extend_from_slice(&e.score.to_le_bytes());
                put_str(out, &e.comment, COMMENT_FIELD);
                put_str(out, &e.date, DATE_FIELD);
            }
            None => out.resize(out.len() + EVAL_SLOT_LEN, 0),
        }
    }

    let marks = &s.attendance[..s.attendance.len().min(MAX_ATTENDANCE)];
    out.extend_from_slice(&(marks.len() as u32).to_le_bytes());
    for i in 0..MAX_ATTENDANCE {
        match marks.get(i) {
            Some(m) => {
                put_str(out, &m.date, DATE_FIELD);
                out.push(m.present as u8);
            }
            None => out.resize(out.len() + ATT_SLOT_LEN, 0),
        }
    }
}

fn decode_student(r: &mut Reader<'_>) -> anyhow::Result<Student> {
    let class_id = r.i32();
    let enrollment = r.i32();
    let name = r.str(NAME_FIELD);
    let grades = Grades {
        np1: r.f32(),
        np2: r.f32(),
        pim: r.f32(),
        average: r.f32(),
    };

    let eval_count = r.u32() as usize;
    if eval_count > MAX_EVALUATIONS {
        bail!(
            "student {} claims {} evaluations (max {})",
            enrollment,
            eval_count,
            MAX_EVALUATIONS
        );
    }
    let mut evaluations = Vec::with_capacity(eval_count);
    for i in 0..MAX_EVALUATIONS {
        let score = r.f32();
        let comment = r.str(COMMENT_FIELD);
        let date = r.str(DATE_FIELD);
        if i < eval_count {
            evaluations.push(Evaluation {
                score,
                comment,
                date,
            });
        }
    }

    let att_count = r.u32() as usize;
    if att_count > MAX_ATTENDANCE {
        bail!(
            "student {} claims {} attendance marks (max {})",
            enrollment,
            att_count,
            MAX_ATTENDANCE
        );
    }
    let mut attendance = Vec::with_capacity(att_count);
    for i in 0..MAX_ATTENDANCE {
        let date = r.str(DATE_FIELD);
        let present = r.take(1)[0] != 0;
        if i < att_count {
            attendance.push(AttendanceMark { date, present });
        }
    }

    Ok(Student {
        class_id,
        enrollment,
        name,
        grades,
        evaluations,
        attendance,
    })
}

fn read_table(path: &Path, record_len: usize) -> anyhow::Result<Option<Vec<u8>>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.to_string_lossy()))
        }
    };
    if bytes.len() < 4 {
        bail!("{} is too short for a record count", path.to_string_lossy());
    }
    let count = u32::from_le_bytes(bytes[..4].try_into().unwrap_or([0; 4])) as usize;
    let expected = 4 + count * record_len;
    if bytes.len() != expected {
        bail!(
            "{} is corrupt: {} records need {} bytes, file has {}",
            path.to_string_lossy(),
            count,
            expected,
            bytes.len()
        );
    }
    Ok(Some(bytes))
}

pub fn read_classes(path: &Path) -> anyhow::Result<Vec<Class>> {
    let Some(bytes) = read_table(path, CLASS_RECORD_LEN)? else {
        return Ok(Vec::new());
    };
    let mut r = Reader::new(&bytes);
    let count = r.u32() as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(decode_class(&mut r));
    }
    Ok(out)
}

pub fn read_students(path: &Path) -> anyhow::Result<Vec<Student>> {
    let Some(bytes) = read_table(path, STUDENT_RECORD_LEN)? else {
        return Ok(Vec::new());
    };
    let mut r = Reader::new(&bytes);
    let count = r.u32() as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(decode_student(&mut r)?);
    }
    Ok(out)
}

pub fn write_classes(path: &Path, classes: &[Class]) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(4 + classes.len() * CLASS_RECORD_LEN);
    bytes.extend_from_slice(&(classes.len() as u32).to_le_bytes());
    for c in classes {
        encode_class(&mut bytes, c);
    }
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))
}

pub fn write_students(path: &Path, students: &[Student]) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(4 + students.len() * STUDENT_RECORD_LEN);
    bytes.extend_from_slice(&(students.len() as u32).to_le_bytes());
    for s in students {
        encode_student(&mut bytes, s);
    }
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))
}
