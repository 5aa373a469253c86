use crate::types::ProteinSequence;

/// Return the residues of a FASTA record as one string.  Header lines
/// (starting with '>') are dropped and all whitespace is removed, so
/// wrapped and unwrapped records give the same result.  If the text
/// contains several records they are concatenated.
pub fn fasta_sequence(fasta_text: &str) -> ProteinSequence {
    fasta_text.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// The header of the first record, without the '>'.
pub fn fasta_header(fasta_text: &str) -> Option<&str> {
    fasta_text.lines()
        .map(str::trim)
        .find(|line| line.starts_with('>'))
        .map(|line| line[1..].trim())
}

// a width of 0 means no line wrapping
pub fn format_fasta(id: &str, maybe_desc: Option<&str>,
                    seq: &str, width: usize) -> String {
    let mut ret = ">".to_owned() + id;

    if let Some(desc) = maybe_desc {
        ret.push(' ');
        ret.push_str(desc);
    }

    ret.push('\n');

    if seq.is_empty() {
        ret.push('\n');
    } else {
        let mut count = 0;
        for c in seq.chars() {
            ret.push(c);
            count += 1;
            if width > 0 && count % width == 0 {
                ret.push('\n');
            }
        }

        if width == 0 || count % width != 0 {
            ret.push('\n');
        }
    }

    ret
}
