//! # 仪表板会话
//!
//! 保存每个属性标签页的界面状态（过滤选择、平均曲线开关、
//! 引用数模式、着色依据），对事件逐个分派并重新计算视图。
//!
//! 属性数据库以 `&mut PropertyStore` 注入；"添加属性" 只追加到该存储，
//! 进程结束即丢弃。
//!
//! ## 依赖关系
//! - 被 `commands/session.rs` 使用
//! - 使用 `analysis/` 计算视图，`export/` 生成下载内容
//! - 使用 `database/` 的 PropertyStore, NewPropertyForm

use super::event::Event;
use crate::analysis::colour::to_hex;
use crate::analysis::curve::group_curves;
use crate::analysis::stats::{
    author_breakdown, citation_ranking, isotope_breakdown, material_breakdown, year_histogram,
    FIRST_YEAR,
};
use crate::analysis::table::table_rows;
use crate::analysis::{
    filter_properties, mean_property, ArrheniusCurve, CitationEntry, ColourBy, ColourMap,
    MeanMethod, MeanProperty, Slice, TableRow, YearBin, CURVE_POINTS, DEFAULT_YEAR_STEP,
};
use crate::database::PropertyStore;
use crate::error::Result;
use crate::export::{generate_python_script, to_json_string, JSON_FILENAME, SCRIPT_FILENAME};
use crate::models::{normalise_materials, FilterSelection, Isotope, PropertyKind, YearRange};

use serde::Serialize;
use std::collections::BTreeMap;

/// 初始选中的材料
pub const INITIAL_MATERIAL: &str = "tungsten";

/// 默认年份选择：该类型记录的完整年份跨度；没有记录时为 1950 至今
pub fn default_years(store: &PropertyStore, kind: PropertyKind, current_year: i32) -> YearRange {
    store.year_bounds(kind).unwrap_or(YearRange {
        min: FIRST_YEAR.min(current_year),
        max: current_year,
    })
}

/// 单个标签页的界面状态
#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub kind: PropertyKind,
    pub selection: FilterSelection,
    pub material_options: Vec<String>,
    pub author_options: Vec<String>,
    /// 引用数按年归一化
    pub per_year: bool,
    pub colour_by: ColourBy,
    /// 仅在最近一次重绘由 "计算平均" 触发时叠加平均曲线
    pub mean: Option<MeanMethod>,
}

impl TabState {
    /// 新标签页：tungsten、全部同位素、tungsten 记录的全部作者、该类型的完整年份跨度
    pub fn initial(store: &PropertyStore, kind: PropertyKind, current_year: i32) -> Self {
        let materials = vec![INITIAL_MATERIAL.to_string()];
        let authors = store.authors(kind, Some(materials.as_slice()));
        let years = default_years(store, kind, current_year);

        TabState {
            kind,
            selection: FilterSelection::new(
                materials,
                Isotope::ALL.to_vec(),
                authors.clone(),
                Some(years),
            ),
            material_options: store.material_options(),
            author_options: authors,
            per_year: false,
            colour_by: ColourBy::default(),
            mean: None,
        }
    }
}

/// 一个标签页的完整视图
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub kind: PropertyKind,
    pub selection: FilterSelection,
    pub curves: Vec<ArrheniusCurve>,
    /// 与 `curves` 一一对应的 `#RRGGBB` 颜色
    pub curve_colours: Vec<String>,
    pub mean: Option<MeanProperty>,
    pub axis_label: String,
    /// 全时段属性组的年份直方图
    pub year_histogram: Vec<YearBin>,
    pub per_year: bool,
    pub citations: Vec<CitationEntry>,
    pub materials: Vec<Slice>,
    pub isotopes: Vec<Slice>,
    pub authors: Vec<Slice>,
    pub table: Vec<TableRow>,
    pub material_options: Vec<String>,
    pub author_options: Vec<String>,
    /// 需要提示用户但不中断会话的信息
    pub notice: Option<String>,
}

/// 事件处理结果
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 重新计算后的视图
    View(Box<DashboardView>),
    /// 下载文件
    Download {
        filename: &'static str,
        content: String,
    },
    /// 新属性表单校验失败（行内提示）
    FormError(String),
}

/// 仪表板会话
#[derive(Debug, Clone)]
pub struct Session {
    tab: TabState,
    parked: BTreeMap<PropertyKind, TabState>,
    current_year: i32,
}

impl Session {
    pub fn new(store: &PropertyStore, kind: PropertyKind, current_year: i32) -> Self {
        Session {
            tab: TabState::initial(store, kind, current_year),
            parked: BTreeMap::new(),
            current_year,
        }
    }

    /// 当前标签页
    pub fn tab(&self) -> &TabState {
        &self.tab
    }

    /// 处理一个事件
    pub fn handle(&mut self, store: &mut PropertyStore, event: Event) -> Result<Outcome> {
        let kind = self.tab.kind;

        match event {
            Event::SelectTab { property } => {
                if property != kind {
                    let restored = self
                        .parked
                        .remove(&property)
                        .unwrap_or_else(|| TabState::initial(store, property, self.current_year));
                    let previous = std::mem::replace(&mut self.tab, restored);
                    self.parked.insert(previous.kind, previous);
                }
                self.tab.mean = None;
            }
            Event::SelectMaterials { materials } => {
                self.tab.selection.materials = normalise_materials(&materials);
                self.tab.mean = None;
            }
            Event::SelectIsotopes { isotopes } => {
                self.tab.selection.isotopes = isotopes;
                self.tab.mean = None;
            }
            Event::SelectAuthors { authors } => {
                self.tab.selection.authors = authors;
                self.tab.mean = None;
            }
            Event::SelectYears { years } => {
                self.tab.selection.years = Some(years);
                self.tab.mean = None;
            }
            Event::AddAllMaterials => {
                let all = store.material_options();
                self.tab.selection.materials = all.clone();
                self.tab.material_options = all;
                self.tab.mean = None;
            }
            Event::AddAllAuthors => {
                let all = store.authors(kind, None);
                self.tab.selection.authors = all.clone();
                self.tab.author_options = all;
                self.tab.mean = None;
            }
            Event::SetCitationMode { per_year } => {
                self.tab.per_year = per_year;
            }
            Event::SetColourBy { colour_by } => {
                self.tab.colour_by = colour_by;
                self.tab.mean = None;
            }
            Event::ComputeMean { method } => {
                self.tab.mean = Some(method);
            }
            Event::SubmitProperty { form } => {
                let record = match form.validate(kind) {
                    Ok(record) => record,
                    Err(e) => return Ok(Outcome::FormError(e.to_string())),
                };
                store.append(record);

                // 选项刷新：作者限定为当前选中材料
                self.tab.material_options = store.materials(kind);
                self.tab.author_options =
                    store.authors(kind, Some(self.tab.selection.materials.as_slice()));
            }
            Event::ExtractData => {
                let group = filter_properties(store, kind, &self.tab.selection);
                return Ok(Outcome::Download {
                    filename: JSON_FILENAME,
                    content: to_json_string(&group)?,
                });
            }
            Event::GeneratePython => {
                return Ok(Outcome::Download {
                    filename: SCRIPT_FILENAME,
                    content: generate_python_script(kind, &self.tab.selection),
                });
            }
        }

        Ok(Outcome::View(Box::new(self.view(store)?)))
    }

    /// 按当前状态重新计算视图
    pub fn view(&self, store: &PropertyStore) -> Result<DashboardView> {
        let tab = &self.tab;
        let group = filter_properties(store, tab.kind, &tab.selection);
        let all_time = filter_properties(store, tab.kind, &tab.selection.all_time());

        let colours = ColourMap::new(&group, tab.colour_by);
        let curve_colours = group
            .iter()
            .enumerate()
            .map(|(i, r)| to_hex(colours.colour_of(r, i)))
            .collect();

        let mut notice = None;
        let mean = match tab.mean {
            Some(method) => match mean_property(&group, method) {
                Ok(mean) => Some(mean),
                Err(e) => {
                    notice = Some(format!("Mean value unavailable: {}", e));
                    None
                }
            },
            None => None,
        };

        Ok(DashboardView {
            kind: tab.kind,
            selection: tab.selection.clone(),
            curves: group_curves(&group, CURVE_POINTS),
            curve_colours,
            mean,
            axis_label: group.axis_label(),
            year_histogram: year_histogram(
                &all_time,
                DEFAULT_YEAR_STEP,
                self.current_year,
                tab.selection.years,
            )?,
            per_year: tab.per_year,
            citations: citation_ranking(&group, tab.per_year, self.current_year),
            materials: material_breakdown(&group),
            isotopes: isotope_breakdown(&group),
            authors: author_breakdown(&group),
            table: table_rows(&group),
            material_options: tab.material_options.clone(),
            author_options: tab.author_options.clone(),
            notice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::NewPropertyForm;
    use crate::export::json;

    const YEAR: i32 = 2026;

    fn setup() -> (PropertyStore, Session) {
        let store = PropertyStore::bundled().unwrap();
        let session = Session::new(&store, PropertyKind::Diffusivity, YEAR);
        (store, session)
    }

    fn expect_view(outcome: Outcome) -> DashboardView {
        match outcome {
            Outcome::View(view) => *view,
            other => panic!("expected a view, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_selection() {
        let (store, session) = setup();
        let sel = &session.tab().selection;
        assert_eq!(sel.materials, vec!["tungsten".to_string()]);
        assert_eq!(sel.isotopes, Isotope::ALL.to_vec());
        assert_eq!(
            sel.authors,
            vec!["Esteban", "Frauenfelder", "Heinola", "Holzner"]
        );
        assert_eq!(sel.years, store.year_bounds(PropertyKind::Diffusivity));

        let view = session.view(&store).unwrap();
        assert_eq!(view.table.len(), 4);
        assert_eq!(view.curves.len(), view.curve_colours.len());
        assert!(view.mean.is_none());
    }

    #[test]
    fn test_mean_shown_only_after_compute_mean() {
        let (mut store, mut session) = setup();
        let view = expect_view(
            session
                .handle(&mut store, Event::ComputeMean { method: MeanMethod::LogAverage })
                .unwrap(),
        );
        let mean = view.mean.expect("mean overlay");
        assert_eq!(mean.count, 4);

        // 引用数模式不重绘曲线
        let view = expect_view(
            session
                .handle(&mut store, Event::SetCitationMode { per_year: true })
                .unwrap(),
        );
        assert!(view.mean.is_some());
        assert!(view.per_year);

        let view = expect_view(
            session
                .handle(
                    &mut store,
                    Event::SelectYears {
                        years: YearRange::new(1960, 2005).unwrap(),
                    },
                )
                .unwrap(),
        );
        assert!(view.mean.is_none());
        assert_eq!(view.table.len(), 2);
    }

    #[test]
    fn test_selected_materials_match_any_case() {
        let (mut store, mut session) = setup();
        let view = expect_view(
            session
                .handle(
                    &mut store,
                    Event::SelectMaterials {
                        materials: vec![" Tungsten".to_string()],
                    },
                )
                .unwrap(),
        );
        assert_eq!(view.selection.materials, vec!["tungsten".to_string()]);
        assert_eq!(view.table.len(), 4);
    }

    #[test]
    fn test_mean_of_empty_group_is_a_notice() {
        let (mut store, mut session) = setup();
        session
            .handle(&mut store, Event::SelectMaterials { materials: vec![] })
            .unwrap();
        let view = expect_view(
            session
                .handle(&mut store, Event::ComputeMean { method: MeanMethod::default() })
                .unwrap(),
        );
        assert!(view.mean.is_none());
        assert!(view.notice.is_some());
        assert!(view.curves.is_empty());
        assert!(view.isotopes.iter().all(|s| s.count == 0));
        assert_eq!(view.isotopes.len(), 3);
        assert_eq!(view.year_histogram.iter().map(|b| b.count).sum::<usize>(), 0);
    }

    #[test]
    fn test_histogram_ignores_year_selection() {
        let (mut store, mut session) = setup();
        let view = expect_view(
            session
                .handle(
                    &mut store,
                    Event::SelectYears {
                        years: YearRange::new(2015, 2026).unwrap(),
                    },
                )
                .unwrap(),
        );
        assert_eq!(view.table.len(), 1);
        let total: usize = view.year_histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
        assert!(view.year_histogram.iter().any(|b| b.selected));
        assert!(view.year_histogram.iter().any(|b| !b.selected));
    }

    #[test]
    fn test_submit_property() {
        let (mut store, mut session) = setup();
        let before = store.len();

        let incomplete = NewPropertyForm {
            pre_exp: Some(1.0e-7),
            ..Default::default()
        };
        let outcome = session
            .handle(&mut store, Event::SubmitProperty { form: incomplete })
            .unwrap();
        assert!(matches!(outcome, Outcome::FormError(_)));
        assert_eq!(store.len(), before);

        let form = NewPropertyForm {
            pre_exp: Some(1.0e-7),
            act_energy: Some(0.2),
            author: Some("Smith".to_string()),
            year: Some(2015),
            isotope: Some(Isotope::T),
            material: Some("tungsten".to_string()),
            ..Default::default()
        };
        let view = expect_view(
            session
                .handle(&mut store, Event::SubmitProperty { form })
                .unwrap(),
        );
        assert_eq!(store.len(), before + 1);
        assert!(view.author_options.contains(&"Smith".to_string()));
        // 新作者尚未被选中
        assert_eq!(view.table.len(), 4);

        let view = expect_view(session.handle(&mut store, Event::AddAllAuthors).unwrap());
        assert_eq!(view.table.len(), 5);
    }

    #[test]
    fn test_downloads() {
        let (mut store, mut session) = setup();
        match session.handle(&mut store, Event::ExtractData).unwrap() {
            Outcome::Download { filename, content } => {
                assert_eq!(filename, "data.json");
                let group = filter_properties(&store, PropertyKind::Diffusivity, &session.tab().selection);
                let back = json::read_exported(&content, &group).unwrap();
                assert_eq!(back.len(), 4);
            }
            other => panic!("expected a download, got {:?}", other),
        }
        match session.handle(&mut store, Event::GeneratePython).unwrap() {
            Outcome::Download { filename, content } => {
                assert_eq!(filename, "script.py");
                assert!(content.contains("htm.diffusivities"));
                assert!(content.contains("np.arange(1969, 2020 + 1"));
            }
            other => panic!("expected a download, got {:?}", other),
        }
    }

    #[test]
    fn test_tabs_keep_their_state() {
        let (mut store, mut session) = setup();
        session.handle(&mut store, Event::AddAllMaterials).unwrap();
        let view = expect_view(
            session
                .handle(
                    &mut store,
                    Event::SelectTab {
                        property: PropertyKind::Solubility,
                    },
                )
                .unwrap(),
        );
        assert_eq!(view.kind, PropertyKind::Solubility);
        assert_eq!(view.selection.materials, vec!["tungsten".to_string()]);

        session
            .handle(
                &mut store,
                Event::SelectTab {
                    property: PropertyKind::Diffusivity,
                },
            )
            .unwrap();
        assert_eq!(session.tab().selection.materials, store.material_options());
    }

    #[test]
    fn test_colour_by_material_shares_colours() {
        let (mut store, mut session) = setup();
        let view = expect_view(
            session
                .handle(
                    &mut store,
                    Event::SetColourBy {
                        colour_by: ColourBy::Material,
                    },
                )
                .unwrap(),
        );
        assert!(view.curve_colours.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(view.materials.len(), 1);
    }
}
