//! Value objects
//!
//! 不変で、値そのものが同一性を表すドメインの型を定義します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Folder path identifying a room (also the broadcast group key)
///
/// Always starts with `/` and never ends with `/` unless it is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderPath(String);

impl FolderPath {
    /// Create a folder path, normalizing leading and trailing separators.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyFolderPath);
        }

        let stripped = trimmed.trim_end_matches('/');
        let normalized = if stripped.is_empty() {
            "/".to_string()
        } else if stripped.starts_with('/') {
            stripped.to_string()
        } else {
            format!("/{}", stripped)
        };

        Ok(Self(normalized))
    }

    /// The collection root (`/`)
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Whether the picture lives in this folder or one of its descendants.
    pub fn contains(&self, picture: &PictureId) -> bool {
        if self.is_root() {
            return true;
        }
        picture
            .as_str()
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl TryFrom<String> for FolderPath {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picture identifier: `/`-separated path relative to the collection root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PictureId(String);

impl PictureId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.len() < 2 || !value.starts_with('/') || value.ends_with('/') {
            return Err(ValueObjectError::InvalidPictureId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Folder directly containing the picture.
    pub fn folder(&self) -> FolderPath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) if !parent.is_empty() => FolderPath(parent.to_string()),
            _ => FolderPath::root(),
        }
    }

    /// Every folder above the picture, nearest first, ending with the root.
    pub fn ancestors(&self) -> Vec<FolderPath> {
        let mut folders = Vec::new();
        let mut current = self.0.as_str();
        while let Some((parent, _)) = current.rsplit_once('/') {
            if parent.is_empty() {
                break;
            }
            folders.push(FolderPath(parent.to_string()));
            current = parent;
        }
        folders.push(FolderPath::root());
        folders
    }
}

impl TryFrom<String> for PictureId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PictureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport-safe form of a picture identifier.
///
/// Only `%`, `#` and `?` are percent-encoded; separators and every other
/// character stay literal so the client can load the picture by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DisplayId(String);

impl DisplayId {
    pub fn encode(picture: &PictureId) -> Self {
        let mut encoded = String::with_capacity(picture.as_str().len());
        for c in picture.as_str().chars() {
            match c {
                '%' => encoded.push_str("%25"),
                '#' => encoded.push_str("%23"),
                '?' => encoded.push_str("%3F"),
                other => encoded.push(other),
            }
        }
        Self(encoded)
    }

    /// Display id of an empty window
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque token regenerated on every process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchId(String);

impl LaunchId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a single transport connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(id: &str) -> PictureId {
        PictureId::new(id.to_string()).unwrap()
    }

    fn folder(path: &str) -> FolderPath {
        FolderPath::new(path.to_string()).unwrap()
    }

    #[test]
    fn test_display_id_encodes_only_url_significant_characters() {
        // テスト項目: %, #, ? だけがパーセントエンコードされる
        // given (前提条件):
        let id = picture("/foo?/#bar/%image.gif");

        // when (操作):
        let display_id = DisplayId::encode(&id);

        // then (期待する結果):
        assert_eq!(display_id.as_str(), "/foo%3F/%23bar/%25image.gif");
    }

    #[test]
    fn test_display_id_formats_as_encoded_value() {
        // テスト項目: display_id をそのまま書式化するとエンコード済みの文字列になる
        // given (前提条件):
        let display_id = DisplayId::encode(&picture("/a?/b.jpg"));

        // when (操作):
        let formatted = format!("showing '{}'", display_id);

        // then (期待する結果):
        assert_eq!(formatted, "showing '/a%3F/b.jpg'");
    }

    #[test]
    fn test_display_id_keeps_other_characters_literal() {
        // テスト項目: 区切り文字やスペース、マルチバイト文字はそのまま残る
        // given (前提条件):
        let id = picture("/旅行/2020 summer/a&b+c.jpg");

        // when (操作):
        let display_id = DisplayId::encode(&id);

        // then (期待する結果):
        assert_eq!(display_id.as_str(), "/旅行/2020 summer/a&b+c.jpg");
    }

    #[test]
    fn test_display_id_encoding_is_not_idempotent_on_percent() {
        // テスト項目: エンコード済みの値を再度エンコードすると % が再エンコードされる
        // given (前提条件):
        let once = DisplayId::encode(&picture("/a?.jpg"));

        // when (操作):
        let twice = DisplayId::encode(&picture(once.as_str()));

        // then (期待する結果):
        assert_eq!(once.as_str(), "/a%3F.jpg");
        assert_eq!(twice.as_str(), "/a%253F.jpg");
    }

    #[test]
    fn test_folder_path_normalization() {
        // テスト項目: フォルダパスの先頭と末尾の区切り文字が正規化される
        // given (前提条件):
        let inputs = ["photos/2020/", "/photos/2020", "/photos/2020//"];

        // when (操作):
        let paths: Vec<FolderPath> = inputs.iter().map(|p| folder(p)).collect();

        // then (期待する結果):
        assert!(paths.iter().all(|p| p.as_str() == "/photos/2020"));
        assert_eq!(folder("/").as_str(), "/");
        assert_eq!(folder("///").as_str(), "/");
    }

    #[test]
    fn test_folder_path_rejects_empty() {
        // テスト項目: 空のフォルダパスはエラーになる
        // given (前提条件):
        let input = "   ".to_string();

        // when (操作):
        let result = FolderPath::new(input);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyFolderPath));
    }

    #[test]
    fn test_folder_contains_descendants_only() {
        // テスト項目: フォルダは配下の画像だけを含み、名前が前方一致するだけの兄弟は含まない
        // given (前提条件):
        let photos = folder("/photos");

        // when (操作) / then (期待する結果):
        assert!(photos.contains(&picture("/photos/a.jpg")));
        assert!(photos.contains(&picture("/photos/2020/b.jpg")));
        assert!(!photos.contains(&picture("/photos2/c.jpg")));
        assert!(FolderPath::root().contains(&picture("/photos2/c.jpg")));
    }

    #[test]
    fn test_picture_folder_and_ancestors() {
        // テスト項目: 画像の親フォルダと祖先フォルダが近い順に得られる
        // given (前提条件):
        let id = picture("/a/b/c.jpg");

        // when (操作):
        let parent = id.folder();
        let ancestors = id.ancestors();

        // then (期待する結果):
        assert_eq!(parent, folder("/a/b"));
        assert_eq!(ancestors, vec![folder("/a/b"), folder("/a"), FolderPath::root()]);
    }

    #[test]
    fn test_picture_at_root_has_only_root_ancestor() {
        // テスト項目: ルート直下の画像の祖先はルートのみ
        // given (前提条件):
        let id = picture("/top.png");

        // when (操作):
        let ancestors = id.ancestors();

        // then (期待する結果):
        assert_eq!(id.folder(), FolderPath::root());
        assert_eq!(ancestors, vec![FolderPath::root()]);
    }

    #[test]
    fn test_picture_id_validation() {
        // テスト項目: 不正な画像 ID はエラーになる
        // given (前提条件):
        let invalid = ["", "/", "relative.jpg", "/dir/"];

        // when (操作) / then (期待する結果):
        for value in invalid {
            assert!(PictureId::new(value.to_string()).is_err(), "{value}");
        }
    }

    #[test]
    fn test_launch_ids_differ_between_generations() {
        // テスト項目: LaunchId は生成ごとに異なる
        // given (前提条件) / when (操作):
        let first = LaunchId::generate();
        let second = LaunchId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(!first.as_str().is_empty());
    }
}
