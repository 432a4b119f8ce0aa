pub(crate) trait StringExt {
    fn push_join(&mut self, separator: &str, items: impl IntoIterator<Item = impl AsRef<str>>);

    /// Appends each non-empty line of a script, terminating every line with `\n`.
    fn push_script(&mut self, script: impl AsRef<str>);
}

impl StringExt for String {
    fn push_join(&mut self, separator: &str, items: impl IntoIterator<Item = impl AsRef<str>>) {
        for (idx, v) in items.into_iter().enumerate() {
            if idx > 0 {
                self.push_str(separator);
            }
            self.push_str(v.as_ref());
        }
    }

    fn push_script(&mut self, script: impl AsRef<str>) {
        for line in script.as_ref().lines().filter(|l| !l.is_empty()) {
            self.push_str(line);
            self.push('\n');
        }
    }
}
