use directories::BaseDirs;
use image::DynamicImage;
use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
    sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError},
    thread,
    time::Duration,
};

/// The default amount of time to wait for an image to be loaded.
pub const DEFAULT_IMAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(2);

type LoadResult = Result<DynamicImage, LoadImageError>;

/// Loads images from the filesystem.
///
/// Reading and decoding happens in a worker thread. The first lookup for a path waits up to the
/// configured timeout; if the worker isn't done by then, the load stays pending and later lookups
/// never wait for it again. Use `poll_pending` to find out when a pending load completes.
#[derive(Debug)]
pub struct ImageLoader {
    base_path: PathBuf,
    timeout: Duration,
    images: RefCell<HashMap<PathBuf, ImageState>>,
}

impl ImageLoader {
    /// Construct a new loader over the provided base path.
    ///
    /// Any relative paths will be assumed to be relative to the given base.
    pub fn new<P: Into<PathBuf>>(base_path: P, timeout: Duration) -> Self {
        Self { base_path: base_path.into(), timeout, images: Default::default() }
    }

    /// Load the image at the given path.
    ///
    /// Failed loads are not cached, so they're retried the next time the image is needed.
    pub(crate) fn load(&self, path: &str) -> Result<Rc<DynamicImage>, LoadImageError> {
        let path = self.resolve_path(path);
        let mut images = self.images.borrow_mut();
        if let Some(ImageState::Loaded(image)) = images.get(&path) {
            return Ok(image.clone());
        }
        let result = match images.remove(&path) {
            Some(ImageState::Pending(receiver)) => match receiver.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => {
                    images.insert(path.clone(), ImageState::Pending(receiver));
                    return Err(LoadImageError::Pending(path));
                }
                Err(TryRecvError::Disconnected) => return Err(LoadImageError::WorkerGone(path)),
            },
            _ => {
                let receiver = Self::spawn_worker(path.clone());
                match receiver.recv_timeout(self.timeout) {
                    Ok(result) => result,
                    Err(RecvTimeoutError::Timeout) => {
                        tracing::debug!("image {} is taking too long to load", path.display());
                        images.insert(path.clone(), ImageState::Pending(receiver));
                        return Err(LoadImageError::Timeout(path));
                    }
                    Err(RecvTimeoutError::Disconnected) => return Err(LoadImageError::WorkerGone(path)),
                }
            }
        };
        let image = Rc::new(result?);
        tracing::debug!("loaded image {}", path.display());
        images.insert(path, ImageState::Loaded(image.clone()));
        Ok(image)
    }

    /// Check on every pending load without blocking.
    ///
    /// Returns whether any image finished loading since the last call.
    pub(crate) fn poll_pending(&self) -> bool {
        let mut loaded_any = false;
        self.images.borrow_mut().retain(|path, state| {
            let ImageState::Pending(receiver) = state else {
                return true;
            };
            match receiver.try_recv() {
                Ok(Ok(image)) => {
                    tracing::debug!("loaded image {} in the background", path.display());
                    *state = ImageState::Loaded(Rc::new(image));
                    loaded_any = true;
                    true
                }
                Ok(Err(e)) => {
                    tracing::warn!("could not load image: {e}");
                    false
                }
                Err(TryRecvError::Empty) => true,
                Err(TryRecvError::Disconnected) => false,
            }
        });
        loaded_any
    }

    fn spawn_worker(path: PathBuf) -> Receiver<LoadResult> {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            // The loader may be gone by the time we're done, that's fine.
            let _ = sender.send(Self::read_image(&path));
        });
        receiver
    }

    fn read_image(path: &Path) -> LoadResult {
        let contents = fs::read(path).map_err(|e| LoadImageError::Io(path.to_path_buf(), e))?;
        image::load_from_memory(&contents).map_err(|e| LoadImageError::Decode(path.to_path_buf(), e))
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = path.trim();
        let path = match path.strip_prefix('~') {
            Some(rest) => match BaseDirs::new() {
                Some(dirs) => dirs.home_dir().join(rest.trim_start_matches('/')),
                None => PathBuf::from(path),
            },
            None => PathBuf::from(path),
        };
        self.base_path.join(path)
    }
}

#[derive(Debug)]
enum ImageState {
    Pending(Receiver<LoadResult>),
    Loaded(Rc<DynamicImage>),
}

/// An error loading an image.
#[derive(thiserror::Error, Debug)]
pub enum LoadImageError {
    #[error("io error opening {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("decoding image {0}: {1}")]
    Decode(PathBuf, image::ImageError),

    #[error("timed out loading image {0}")]
    Timeout(PathBuf),

    #[error("image {0} is still loading")]
    Pending(PathBuf),

    #[error("image loader for {0} exited unexpectedly")]
    WorkerGone(PathBuf),
}
