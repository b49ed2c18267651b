use super::CodePointSet;

#[test]
fn sorted_and_deduplicated() {
    let set = CodePointSet::from_text("BAAC B");
    assert_eq!(set.as_slice(), &[0x20, 0x41, 0x42, 0x43]);
}

#[test]
fn repeated_character_yields_one_entry() {
    let set = CodePointSet::from_text("AA");
    assert_eq!(set.as_slice(), &[0x41]);
    assert_eq!(set.len(), 1);
}

#[test]
fn cjk_text_is_strictly_ascending() {
    let set = CodePointSet::from_text("滕王高阁临江渚，佩玉鸣鸾罢歌舞。王阁");
    let pts = set.as_slice();
    assert!(pts.windows(2).all(|w| w[0] < w[1]));
    assert!(set.contains(0x738B)); // 王
    assert_eq!(pts.len(), 16);
}

#[test]
fn same_text_gives_same_set() {
    let text = "0123456789#=+-ABCDEFG 滕王";
    assert_eq!(CodePointSet::from_text(text), CodePointSet::from_text(text));
}

#[test]
fn non_bmp_characters_are_skipped() {
    let set = CodePointSet::from_text("A😀B");
    assert_eq!(set.as_slice(), &[0x41, 0x42]);
}

#[test]
fn empty_text_is_empty_set() {
    let set = CodePointSet::from_text("");
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}

#[test]
fn collects_from_chars() {
    let set: CodePointSet = "cba".chars().collect();
    assert_eq!(set.as_slice(), &[0x61, 0x62, 0x63]);
}
