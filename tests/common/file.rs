use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file: FileSpec) {
    if let Some(parent) = file.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }

    std::fs::write(&file.path, file.content).expect("Failed to write file");
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read file")
}

/// Write `files_count` files named `file_<i>.txt` with random lorem content
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::Fake;
    use fake::faker::lorem::en::Words;

    (0..files_count)
        .map(|i| {
            let file = FileSpec::new(
                dir.join(format!("file_{}.txt", i)),
                Words(5..10).fake::<Vec<String>>().join(" "),
            );
            write_file(file.clone());
            file
        })
        .collect()
}
