//! Localized commit and guidance text (Korean and English)

use std::fmt;

use serde::Deserialize;

use crate::status::DiffStats;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    /// Subject line templates for a commit type, most generic first.
    pub fn subject_templates(self, commit_type: &str) -> &'static [&'static str] {
        match (self, commit_type) {
            (Language::Ko, "feat") => &["새 기능 추가", "기능 초기 도입", "기능 지원 구현"],
            (Language::Ko, "fix") => &["버그 수정", "문제 해결", "엣지 케이스 처리"],
            (Language::Ko, "docs") => &["문서 업데이트", "README 보완", "사용 가이드 추가"],
            (Language::Ko, "refactor") => &["리팩터링", "코드 구조 재정비", "정리"],
            (Language::Ko, "test") => &[
                "테스트 추가",
                "테스트 커버리지 개선",
                "플레이키 테스트 안정화",
            ],
            (Language::Ko, "build") => &["빌드 설정 업데이트", "의존성 조정", "패키징 수정"],
            (Language::Ko, "perf") => &["성능 최적화", "오버헤드 감소", "지연시간 개선"],
            (Language::Ko, "chore") => &["유지보수 작업", "사소한 수정", "설정 업데이트"],
            (Language::Ko, _) => &["업데이트"],

            (Language::En, "feat") => &[
                "add new capability",
                "introduce feature",
                "implement initial support",
            ],
            (Language::En, "fix") => &["fix issue", "resolve bug", "handle edge case"],
            (Language::En, "docs") => &[
                "update documentation",
                "improve README",
                "add usage notes",
            ],
            (Language::En, "refactor") => &[
                "refactor internal structure",
                "reorganize code",
                "cleanup",
            ],
            (Language::En, "test") => &[
                "add tests",
                "improve test coverage",
                "stabilize flaky tests",
            ],
            (Language::En, "build") => &[
                "update build config",
                "adjust dependencies",
                "tweak packaging",
            ],
            (Language::En, "perf") => &[
                "optimize performance",
                "reduce overhead",
                "improve latency",
            ],
            (Language::En, "chore") => &["maintenance chores", "minor tweaks", "update config"],
            (Language::En, _) => &["update"],
        }
    }

    pub fn breaking_footer(self) -> &'static str {
        match self {
            Language::Ko => "BREAKING CHANGE: 하위 호환되지 않는 변경",
            Language::En => "BREAKING CHANGE: behavior changed in a backward-incompatible way",
        }
    }

    pub fn no_changes_hint(self) -> &'static str {
        match self {
            Language::Ko => {
                "변경이 없습니다. 먼저 파일을 수정하거나, staged 모드에서는 `git add`로 스테이징하세요."
            }
            Language::En => "No changes. Modify files first, or run `git add` for staged mode.",
        }
    }

    /// Body lines: per-kind counts, then the key paths.
    pub fn body_lines(self, stats: &DiffStats, key_paths: &[&str]) -> Vec<String> {
        let paths = key_paths.join(", ");
        match self {
            Language::Ko => vec![
                format!(
                    "- 추가: {} 파일, 수정: {} 파일, 삭제: {} 파일",
                    stats.added, stats.modified, stats.deleted
                ),
                format!("- 대표 변경 경로: {paths}"),
            ],
            Language::En => vec![
                format!(
                    "- added: {} files, modified: {} files, deleted: {} files",
                    stats.added, stats.modified, stats.deleted
                ),
                format!("- key paths: {paths}"),
            ],
        }
    }

    pub fn git_unavailable(self, detail: &str) -> String {
        match self {
            Language::Ko => format!(
                "❌ Git 설정 문제\n\n{detail}\n\n해결 방법:\n\
                 1. Git 설치 확인: https://git-scm.com/\n\
                 2. PATH 환경변수에 git 포함 확인\n\
                 3. 터미널에서 'git --version' 명령 테스트"
            ),
            Language::En => format!(
                "❌ Git setup problem\n\n{detail}\n\nHow to fix:\n\
                 1. Check that Git is installed: https://git-scm.com/\n\
                 2. Make sure the git executable is on PATH\n\
                 3. Run 'git --version' in a terminal"
            ),
        }
    }

    pub fn not_a_repository(self, path: &str) -> String {
        match self {
            Language::Ko => format!(
                "❌ Git Repository 문제\n\nGit repository가 아닙니다. 현재 경로: {path}\n\n해결 방법:\n\
                 1. git repository가 있는 디렉토리로 이동\n\
                 2. 새 repository 초기화: 'git init'\n\
                 3. 기존 repository 클론: 'git clone <URL>'"
            ),
            Language::En => format!(
                "❌ Git repository problem\n\nNot a git repository: {path}\n\nHow to fix:\n\
                 1. Run from a directory inside a git repository\n\
                 2. Initialize a new repository: 'git init'\n\
                 3. Clone an existing repository: 'git clone <URL>'"
            ),
        }
    }

    /// `detail` is the trimmed stderr; when empty the exit code is shown.
    pub fn diff_failed(self, detail: &str, code: i32) -> String {
        match self {
            Language::Ko => {
                let detail = if detail.is_empty() {
                    format!("리턴코드 {code}")
                } else {
                    detail.to_string()
                };
                format!(
                    "❌ git diff 실패: {detail}\n\n가능한 원인:\n\
                     1. 잘못된 range 형식 (올바른 예: HEAD~3..HEAD)\n\
                     2. 존재하지 않는 커밋 참조\n\
                     3. git repository 상태 문제"
                )
            }
            Language::En => {
                let detail = if detail.is_empty() {
                    format!("exit code {code}")
                } else {
                    detail.to_string()
                };
                format!(
                    "❌ git diff failed: {detail}\n\nProbable causes:\n\
                     1. Malformed range (for example HEAD~3..HEAD)\n\
                     2. Reference to a commit that does not exist\n\
                     3. Repository in an unexpected state"
                )
            }
        }
    }

    pub fn missing_range(self) -> &'static str {
        match self {
            Language::Ko => "❌ mode=range 인데 range 값이 없습니다. 예: HEAD~3..HEAD",
            Language::En => "❌ mode=range requires a range value, e.g. HEAD~3..HEAD",
        }
    }

    pub fn invalid_range(self, range: &str) -> String {
        match self {
            Language::Ko => format!("❌ range 값은 '-'로 시작할 수 없습니다: {range}"),
            Language::En => format!("❌ range must not start with '-': {range}"),
        }
    }

    pub fn invalid_path(self, path: &str) -> String {
        match self {
            Language::Ko => {
                format!("❌ 지정한 경로가 존재하지 않거나 디렉토리가 아닙니다: {path}")
            }
            Language::En => format!("❌ Path does not exist or is not a directory: {path}"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
