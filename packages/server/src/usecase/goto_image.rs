//! UseCase: 表示中の画像のフォルダへ移動
//!
//! カーソルは動かさずに表示中の画像を「フォルダの最新の画像」として記録し、
//! そのフォルダを返します。ウィンドウが空なら `None` を返します。

use std::sync::Arc;

use crate::domain::{FolderPath, LatestPictureSetter};

use super::{error::GotoImageError, navigator::Navigator};

pub struct GotoImageUseCase {
    navigator: Arc<Navigator>,
    latest: Arc<dyn LatestPictureSetter>,
}

impl GotoImageUseCase {
    pub fn new(navigator: Arc<Navigator>, latest: Arc<dyn LatestPictureSetter>) -> Self {
        Self { navigator, latest }
    }

    pub async fn execute(&self, path: &FolderPath) -> Result<Option<FolderPath>, GotoImageError> {
        let handle = self.navigator.get_or_create_room(path).await?;
        let current = handle.lock().await.current_picture().cloned();

        match current {
            Some(picture) => Ok(Some(self.latest.set_latest(&picture).await?)),
            None => Ok(None),
        }
    }
}
