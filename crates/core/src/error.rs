//! 에러 타입 — 도메인별 에러 정의

/// Aegis 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AegisError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// SBOM 생성 에러
    #[error("sbom error: {0}")]
    Sbom(#[from] SbomError),

    /// 코드 분석 에러
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// 아카이브 가져오기 에러
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// 보고서 저장 에러
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// 알림 전송 에러
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// SBOM 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum SbomError {
    /// 매니페스트 파싱 실패 (파일 단위로 복구 가능)
    #[error("failed to parse manifest {path}: {reason}")]
    ManifestParse { path: String, reason: String },

    /// 루트 디렉토리가 없거나 읽을 수 없음 (치명적)
    #[error("invalid scan root {path}: {reason}")]
    InvalidRoot { path: String, reason: String },

    /// 파일 읽기 실패
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 코드 분석 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 루트 디렉토리가 없거나 읽을 수 없음 (치명적)
    #[error("invalid scan root {path}: {reason}")]
    InvalidRoot { path: String, reason: String },

    /// 파일 읽기 실패
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 아카이브 가져오기 에러
///
/// 네트워크 구현은 협력자 몫이지만, 크기/시간 제한 위반을 포함한
/// 실패 형태는 여기서 고정합니다.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// URL이 유효하지 않음
    #[error("invalid archive url: {0}")]
    InvalidUrl(String),

    /// 최대 크기 초과
    #[error("archive too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    /// 다운로드 시간 초과
    #[error("fetch timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// 전송 실패
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// 압축 해제 실패
    #[error("extract failed: {0}")]
    Extract(String),
}

/// 보고서 저장 에러
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 연결 실패
    #[error("connection failed: {0}")]
    Connection(String),

    /// 쓰기 실패
    #[error("write failed for document {doc_id}: {reason}")]
    Write { doc_id: String, reason: String },
}

/// 알림 전송 에러
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// 인증 실패
    #[error("auth failed: {0}")]
    Auth(String),

    /// 전송 실패
    #[error("post failed: {0}")]
    Post(String),
}
