use std::collections::VecDeque;

/// 网格曲面的数据部分：每行是一个时间点的频谱，最新的行在末尾
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    rows: VecDeque<Vec<f64>>,
    row_capacity: usize,
    columns: usize,
    total_rows_added: u64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SurfaceError {
    #[error("row has {actual} columns, surface expects {expected}")]
    ColumnMismatch { expected: usize, actual: usize },
    #[error("insertion offset must be at least 1")]
    ZeroOffset,
}

impl SurfaceGrid {
    pub fn new(row_capacity: usize, columns: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(row_capacity + 1),
            row_capacity,
            columns,
            total_rows_added: 0,
        }
    }

    /// 追加新行并按容量淘汰最旧的行
    ///
    /// `offset` 为本次推进的行数；大于 1 时先补入空行（值为 0），最后一行为数据。
    pub fn add_row(&mut self, offset: usize, row: &[f64]) -> Result<(), SurfaceError> {
        if offset == 0 {
            return Err(SurfaceError::ZeroOffset);
        }
        if row.len() != self.columns {
            return Err(SurfaceError::ColumnMismatch {
                expected: self.columns,
                actual: row.len(),
            });
        }

        for _ in 1..offset {
            self.rows.push_back(vec![0.0; self.columns]);
        }
        self.rows.push_back(row.to_vec());
        self.total_rows_added += offset as u64;

        while self.rows.len() > self.row_capacity {
            self.rows.pop_front();
        }
        Ok(())
    }

    pub fn rows(&self) -> &VecDeque<Vec<f64>> {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn total_rows_added(&self) -> u64 {
        self.total_rows_added
    }

    pub fn latest(&self) -> Option<&[f64]> {
        self.rows.back().map(|r| r.as_slice())
    }

    /// 当前所有数据的最小值和最大值
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.rows.iter().flat_map(|r| r.iter().copied());
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }

    /// 第 `index` 行（0 为最旧）在时间轴上的位置：最新行在 0，越旧越远
    pub fn row_z(&self, index: usize) -> f64 {
        let age = self.rows.len().saturating_sub(1 + index);
        age as f64
    }
}
