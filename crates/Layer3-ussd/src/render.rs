//! 화면 구성 - 단계 렌더링 결과와 페이지 목록 레이아웃

use parish_foundation::{keys, Localizer};

/// 번호 목록의 한 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// 선택 시 다음 단계로 넘길 ID (가족, 신자, APV)
    pub id: String,
    pub label: String,
}

impl ListEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// 한 단계의 렌더링 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// 입력 프롬프트나 메뉴 텍스트
    Text(String),
    /// 번호 목록 (세션에 보관되어 숫자 입력을 해석)
    List {
        title: String,
        entries: Vec<ListEntry>,
        /// 목록이 비었을 때 메시지
        empty: String,
    },
}

/// 세션에 보관되는 마지막 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList {
    pub title: String,
    pub entries: Vec<ListEntry>,
    pub empty: String,
    /// 0부터 시작하는 현재 페이지
    pub page: usize,
}

impl PagedList {
    pub fn new(title: String, entries: Vec<ListEntry>, empty: String) -> Self {
        Self {
            title,
            entries,
            empty,
            page: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 전체 목록 기준 1-based 번호로 항목 조회
    pub fn pick(&self, number: usize) -> Option<&ListEntry> {
        number.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn has_more(&self, page_size: usize) -> bool {
        (self.page + 1) * page_size.max(1) < self.entries.len()
    }

    /// 다음 페이지로 (마지막 페이지면 false)
    pub fn next_page(&mut self, page_size: usize) -> bool {
        if self.has_more(page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// 현재 페이지 화면
    ///
    /// ```text
    /// title
    /// 3. entry
    /// 4. entry
    /// 98. More
    /// 0. Back
    /// ```
    pub fn layout(&self, page_size: usize, i18n: &dyn Localizer) -> String {
        if self.entries.is_empty() {
            return format!("{}\n{}", self.empty, i18n.t(keys::GO_BACK));
        }

        let size = page_size.max(1);
        let start = self.page * size;
        let mut lines = Vec::with_capacity(size + 3);
        lines.push(self.title.clone());
        for (offset, entry) in self.entries.iter().skip(start).take(size).enumerate() {
            lines.push(format!("{}. {}", start + offset + 1, entry.label));
        }
        if self.has_more(size) {
            lines.push(i18n.t(keys::NEXT_PAGE));
        }
        lines.push(i18n.t(keys::GO_BACK));
        lines.join("\n")
    }
}
